use super::FormatError;
use super::tokenizer::{Spanned, Token, tokenize};
use crate::core::models::atom_count::AtomCount;
use tracing::trace;

/// One entry of a pending group: either a single element or a closed
/// parenthesised subgroup, each carrying the multiplier that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Atom { symbol: String, multiplier: u64 },
    Group { items: Vec<Item>, multiplier: u64 },
}

impl Item {
    fn multiplier_mut(&mut self) -> &mut u64 {
        match self {
            Item::Atom { multiplier, .. } | Item::Group { multiplier, .. } => multiplier,
        }
    }
}

/// Parses a molecular formula into its per-element atom counts.
///
/// Nested parenthesised groups are supported to any depth, and a digit run
/// multiplies the item immediately before it: a bare element when it follows
/// a symbol, the whole group when it follows a closing parenthesis. An item
/// without a digit run counts once.
///
/// Elements appear in the result in the order they are first met scanning
/// the formula left to right, with group contents expanded in place.
///
/// # Errors
///
/// - [`FormatError::EmptyFormula`] for an empty string.
/// - [`FormatError::UnbalancedParentheses`] when the number of `(` and `)` differs.
/// - [`FormatError::UnmatchedClosingParenthesis`] for a `)` that closes nothing.
/// - [`FormatError::DanglingMultiplier`] for digits with nothing to multiply.
/// - [`FormatError::MultiplierOverflow`] when the expanded counts overflow.
/// - [`FormatError::UnexpectedCharacter`] for characters outside the formula alphabet.
///
/// # Examples
///
/// ```
/// use chembal::core::formula::parse_formula;
///
/// let atoms = parse_formula("K4(ON(SO3)2)2").unwrap();
/// assert_eq!(atoms.get("K"), 4);
/// assert_eq!(atoms.get("O"), 14);
/// assert_eq!(atoms.get("N"), 2);
/// assert_eq!(atoms.get("S"), 4);
/// ```
pub fn parse_formula(formula: &str) -> Result<AtomCount, FormatError> {
    validate_format(formula)?;
    let tokens = tokenize(formula)?;
    let root = group_tokens(&tokens)?;
    let atoms = tally(root)?;
    trace!(formula, atoms = %atoms, "Parsed formula.");
    Ok(atoms)
}

fn validate_format(formula: &str) -> Result<(), FormatError> {
    if formula.is_empty() {
        return Err(FormatError::EmptyFormula);
    }
    let open = formula.matches('(').count();
    let close = formula.matches(')').count();
    if open != close {
        return Err(FormatError::UnbalancedParentheses { open, close });
    }
    Ok(())
}

fn group_tokens(tokens: &[Spanned]) -> Result<Vec<Item>, FormatError> {
    let mut stack: Vec<Vec<Item>> = vec![Vec::new()];

    for spanned in tokens {
        match &spanned.token {
            Token::Element(symbol) => {
                current(&mut stack).push(Item::Atom {
                    symbol: symbol.clone(),
                    multiplier: 1,
                });
            }
            Token::OpenParen => stack.push(Vec::new()),
            Token::CloseParen => {
                if stack.len() < 2 {
                    return Err(FormatError::UnmatchedClosingParenthesis {
                        position: spanned.position,
                    });
                }
                let items = stack.pop().unwrap_or_default();
                current(&mut stack).push(Item::Group {
                    items,
                    multiplier: 1,
                });
            }
            Token::Multiplier(value) => {
                let item = current(&mut stack).last_mut().ok_or(
                    FormatError::DanglingMultiplier {
                        position: spanned.position,
                    },
                )?;
                let multiplier = item.multiplier_mut();
                *multiplier = multiplier.checked_mul(u64::from(*value)).ok_or_else(|| {
                    FormatError::MultiplierOverflow {
                        digits: value.to_string(),
                    }
                })?;
            }
        }
    }

    if stack.len() != 1 {
        let open = tokens.iter().filter(|s| s.token == Token::OpenParen).count();
        let close = tokens.iter().filter(|s| s.token == Token::CloseParen).count();
        return Err(FormatError::UnbalancedParentheses { open, close });
    }
    Ok(stack.pop().unwrap_or_default())
}

fn current(stack: &mut Vec<Vec<Item>>) -> &mut Vec<Item> {
    if stack.is_empty() {
        stack.push(Vec::new());
    }
    let last = stack.len() - 1;
    &mut stack[last]
}

fn tally(root: Vec<Item>) -> Result<AtomCount, FormatError> {
    let mut atoms = AtomCount::new();
    let mut work: Vec<(Item, u64)> = root.into_iter().rev().map(|item| (item, 1)).collect();

    while let Some((item, factor)) = work.pop() {
        match item {
            Item::Atom { symbol, multiplier } => {
                let count = factor
                    .checked_mul(multiplier)
                    .ok_or_else(|| overflow(multiplier))?;
                atoms.add(&symbol, count);
            }
            Item::Group { items, multiplier } => {
                let inner = factor
                    .checked_mul(multiplier)
                    .ok_or_else(|| overflow(multiplier))?;
                work.extend(items.into_iter().rev().map(|child| (child, inner)));
            }
        }
    }

    Ok(atoms)
}

fn overflow(multiplier: u64) -> FormatError {
    FormatError::MultiplierOverflow {
        digits: multiplier.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(formula: &str) -> Vec<(String, u64)> {
        parse_formula(formula)
            .unwrap()
            .iter()
            .map(|(s, c)| (s.to_string(), c))
            .collect()
    }

    fn pairs(expected: &[(&str, u64)]) -> Vec<(String, u64)> {
        expected.iter().map(|(s, c)| (s.to_string(), *c)).collect()
    }

    #[test]
    fn simple_molecule_is_counted() {
        let water = parse_formula("H2O").unwrap();
        assert_eq!(water.get("H"), 2);
        assert_eq!(water.get("O"), 1);
        assert_eq!(water.len(), 2);
    }

    #[test]
    fn repeated_elements_are_summed_in_first_seen_order() {
        assert_eq!(
            counts("CH3CH(OH)COOH"),
            pairs(&[("C", 3), ("H", 6), ("O", 3)])
        );
    }

    #[test]
    fn group_multiplier_applies_to_whole_group() {
        assert_eq!(
            counts("C6H2(NO2)3OH"),
            pairs(&[("C", 6), ("H", 3), ("N", 3), ("O", 7)])
        );
    }

    #[test]
    fn nested_groups_expand_multiplicatively() {
        assert_eq!(
            counts("K4(ON(SO3)2)2"),
            pairs(&[("K", 4), ("O", 14), ("N", 2), ("S", 4)])
        );
    }

    #[test]
    fn group_contents_keep_left_to_right_order() {
        assert_eq!(counts("(OH)2Ca"), pairs(&[("O", 2), ("H", 2), ("Ca", 1)]));
    }

    #[test]
    fn explicit_unit_multiplier_matches_omitted_one() {
        assert_eq!(parse_formula("H2O1").unwrap(), parse_formula("H2O").unwrap());
        assert_eq!(
            parse_formula("Ca1(O1H1)2").unwrap(),
            parse_formula("Ca(OH)2").unwrap()
        );
    }

    #[test]
    fn group_without_multiplier_counts_once() {
        assert_eq!(parse_formula("Mn(Cl)2").unwrap(), parse_formula("MnCl2").unwrap());
        assert_eq!(parse_formula("(H)").unwrap().get("H"), 1);
    }

    #[test]
    fn zero_multiplier_removes_the_item() {
        let atoms = parse_formula("H2O0").unwrap();
        assert_eq!(atoms.get("H"), 2);
        assert!(!atoms.contains("O"));
    }

    #[test]
    fn empty_formula_is_rejected() {
        assert_eq!(parse_formula("").unwrap_err(), FormatError::EmptyFormula);
    }

    #[test]
    fn unbalanced_parentheses_are_rejected() {
        assert_eq!(
            parse_formula("(H2O").unwrap_err(),
            FormatError::UnbalancedParentheses { open: 1, close: 0 }
        );
        assert_eq!(
            parse_formula("H2O)").unwrap_err(),
            FormatError::UnbalancedParentheses { open: 0, close: 1 }
        );
    }

    #[test]
    fn misordered_parentheses_are_rejected() {
        assert_eq!(
            parse_formula(")H(").unwrap_err(),
            FormatError::UnmatchedClosingParenthesis { position: 0 }
        );
    }

    #[test]
    fn leading_digits_have_nothing_to_multiply() {
        assert_eq!(
            parse_formula("2H2O").unwrap_err(),
            FormatError::DanglingMultiplier { position: 0 }
        );
        assert_eq!(
            parse_formula("H(2O)").unwrap_err(),
            FormatError::DanglingMultiplier { position: 2 }
        );
    }

    #[test]
    fn overflowing_nested_multipliers_are_rejected() {
        assert!(matches!(
            parse_formula("((((H4000000000)4000000000)4000000000)4000000000)"),
            Err(FormatError::MultiplierOverflow { .. })
        ));
    }

    #[test]
    fn large_multipliers_do_not_expand_in_memory() {
        assert_eq!(parse_formula("(H1000000)1000").unwrap().get("H"), 1_000_000_000);
    }
}
