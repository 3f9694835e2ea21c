use crate::css;

use super::parse::{StyleRule, StyleSheet};

/// Flattens the nested rule tree into a list of output rules, depth-first in
/// pre-order. Every nesting level appends its selector to the parent's with a
/// single space (the descendant combinator). Rules without properties still
/// produce an output rule, so an author's empty block survives to the CSS.
pub(crate) fn flatten_style_sheet(sheet: &StyleSheet<'_>) -> css::Stylesheet {
    let mut result = css::Stylesheet::default();
    for rule in &sheet.rules {
        flatten_style_rule(rule, None, &mut result.rules);
    }
    result
}

fn flatten_style_rule(
    rule: &StyleRule<'_>,
    parent_selector: Option<&str>,
    output: &mut Vec<css::Rule>,
) {
    let selector = match parent_selector {
        Some(parent) => format!("{parent} {}", rule.selector),
        None => rule.selector.to_owned(),
    };

    output.push(css::Rule {
        selector: selector.clone(),
        declarations: rule
            .properties
            .iter()
            .map(|property| css::Declaration {
                name: property.name.into(),
                value: property.value.into(),
            })
            .collect(),
    });

    for child in &rule.children {
        flatten_style_rule(child, Some(&selector), output);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        scss::{
            parse::{parse_style_sheet, Property},
            tokenizer::tokenize,
        },
        Sassling,
    };

    fn flatten_source(source: &str) -> css::Stylesheet {
        let tokens = tokenize(&Sassling::init(), source).unwrap();
        let sheet = parse_style_sheet(&tokens, source).unwrap();
        flatten_style_sheet(&sheet)
    }

    fn selectors(flat: &css::Stylesheet) -> Vec<&str> {
        flat.rules.iter().map(|rule| rule.selector.as_str()).collect()
    }

    #[test]
    fn descendant_concatenation_is_left_associative() {
        let flat = flatten_source("A { B { C {} } }");
        assert_eq!(selectors(&flat), ["A", "A B", "A B C"]);
    }

    #[test]
    fn flattening_is_pre_order() {
        let flat = flatten_source(".a{ .b{} margin: 0; .c{ .d{} } } .e{}");
        assert_eq!(selectors(&flat), [".a", ".a .b", ".a .c", ".a .c .d", ".e"]);
    }

    #[test]
    fn properties_follow_their_rule() {
        let flat = flatten_source(".a{ margin: 0; .b{ color: red; } }");
        assert_eq!(
            flat.rules[0].declarations,
            [css::Declaration {
                name: "margin".into(),
                value: "0".into()
            }]
        );
        assert_eq!(
            flat.rules[1].declarations,
            [css::Declaration {
                name: "color".into(),
                value: "red".into()
            }]
        );
    }

    #[test]
    fn empty_rules_are_kept() {
        let flat = flatten_source(".a { .b { color: red; } }");
        assert_eq!(selectors(&flat), [".a", ".a .b"]);
        assert!(flat.rules[0].declarations.is_empty());
    }

    #[test]
    fn flattening_a_flat_tree_is_identity() {
        let flat = flatten_source(".a{ .b{ color: red; } } .c{ margin: 0; }");

        // Rebuild a tree from the flat list (no nesting) and flatten again.
        let rebuilt = StyleSheet {
            rules: flat
                .rules
                .iter()
                .map(|rule| StyleRule {
                    selector: &rule.selector,
                    properties: rule
                        .declarations
                        .iter()
                        .map(|declaration| Property {
                            name: &declaration.name,
                            value: &declaration.value,
                        })
                        .collect(),
                    children: Vec::new(),
                    variables: Vec::new(),
                })
                .collect(),
            variables: Vec::new(),
        };

        assert_eq!(flatten_style_sheet(&rebuilt), flat);
    }
}
