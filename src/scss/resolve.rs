use super::{
    parse::{StyleRule, StyleSheet, Variable},
    CompileError,
};

fn is_reference(value: &str) -> bool {
    value.starts_with('$')
}

/// Resolves references between entries of one scope's list. Only bindings
/// that precede the referencing entry are visible; a forward reference within
/// the same scope is undefined.
fn resolve_variable_list(variables: &mut [Variable<'_>]) -> Result<(), CompileError> {
    for index in 0..variables.len() {
        let value = variables[index].value;
        if !is_reference(value) {
            continue;
        }

        let resolved = variables[..index]
            .iter()
            .rev()
            .find(|variable| variable.name == value)
            .map(|variable| variable.value)
            .ok_or_else(|| CompileError::UndefinedVariable(value.into()))?;
        variables[index].value = resolved;
    }

    Ok(())
}

fn resolve_style_rule(rule: &mut StyleRule<'_>) -> Result<(), CompileError> {
    resolve_variable_list(&mut rule.variables)?;

    for property in &mut rule.properties {
        if !is_reference(property.value) {
            continue;
        }

        property.value = rule
            .variables
            .iter()
            .rev()
            .find(|variable| variable.name == property.value)
            .map(|variable| variable.value)
            .ok_or_else(|| CompileError::UndefinedVariable(property.value.into()))?;
    }

    for child in &mut rule.children {
        resolve_style_rule(child)?;
    }

    Ok(())
}

/// Rewrites every variable reference in the tree to the literal value of its
/// nearest visible binding. Entirely in place: a reference and the value it
/// resolves to are both slices of the same input buffer, so rewriting is just
/// swapping one `&str` for another.
pub(crate) fn resolve_style_sheet(sheet: &mut StyleSheet<'_>) -> Result<(), CompileError> {
    resolve_variable_list(&mut sheet.variables)?;
    for rule in &mut sheet.rules {
        resolve_style_rule(rule)?;
    }
    Ok(())
}
