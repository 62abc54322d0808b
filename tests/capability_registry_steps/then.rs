//! Then steps for capability registry BDD scenarios.

use super::world::RegistryWorld;
use capability_registry::extension::services::{ExtensionError, ExtensionErrorKind};
use rstest_bdd_macros::then;
use std::sync::Arc;

fn split(list: &str) -> Vec<&str> {
    list.split(',').map(str::trim).collect()
}

#[then(r#"the registered identifiers are "{expected}""#)]
fn registered_identifiers(world: &mut RegistryWorld, expected: String) -> Result<(), eyre::Report> {
    let registry = world.registry()?;
    let identifiers: Vec<String> = registry
        .identifiers()
        .map_err(|err| eyre::eyre!("discovery failed: {err}"))?
        .into_iter()
        .map(String::from)
        .collect();

    if identifiers != split(&expected) {
        return Err(eyre::eyre!(
            "expected identifiers {expected}, found {identifiers:?}"
        ));
    }
    Ok(())
}

#[then(r#"extension "{identifier}" formats "{input}" as "{output}""#)]
fn extension_formats(
    world: &mut RegistryWorld,
    identifier: String,
    input: String,
    output: String,
) -> Result<(), eyre::Report> {
    let registry = world.registry()?;
    let formatter = registry
        .extension(&identifier)
        .map_err(|err| eyre::eyre!("lookup failed: {err}"))?
        .ok_or_else(|| eyre::eyre!("no formatter registered as {identifier}"))?;

    let formatted = formatter.format(&input);
    if formatted != output {
        return Err(eyre::eyre!("expected {output}, found {formatted}"));
    }
    Ok(())
}

#[then("both lookups return the same instance")]
fn lookups_share_instance(world: &RegistryWorld) -> Result<(), eyre::Report> {
    let [first, second] = world.lookups.as_slice() else {
        return Err(eyre::eyre!("expected two lookups, found {}", world.lookups.len()));
    };
    if !Arc::ptr_eq(first, second) {
        return Err(eyre::eyre!("singleton lookups returned distinct instances"));
    }
    Ok(())
}

#[then("both lookups return distinct instances")]
fn lookups_are_distinct(world: &RegistryWorld) -> Result<(), eyre::Report> {
    let [first, second] = world.lookups.as_slice() else {
        return Err(eyre::eyre!("expected two lookups, found {}", world.lookups.len()));
    };
    if Arc::ptr_eq(first, second) {
        return Err(eyre::eyre!("prototype lookups shared one instance"));
    }
    Ok(())
}

#[then(r#"the listed formatters turn "{input}" into "{expected}""#)]
fn listed_formatters_output(
    world: &RegistryWorld,
    input: String,
    expected: String,
) -> Result<(), eyre::Report> {
    let outputs: Vec<String> = world
        .listed
        .iter()
        .map(|formatter| formatter.format(&input))
        .collect();

    if outputs != split(&expected) {
        return Err(eyre::eyre!("expected {expected}, found {outputs:?}"));
    }
    Ok(())
}

#[then("the lookup fails with a configuration error")]
fn lookup_fails_with_configuration_error(world: &RegistryWorld) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the lookup to fail"))?;

    if err.kind() != ExtensionErrorKind::Configuration {
        return Err(eyre::eyre!("expected a configuration error, found {err}"));
    }
    Ok(())
}

#[then("registration fails with a duplicate identifier error")]
fn registration_fails_with_duplicate(world: &RegistryWorld) -> Result<(), eyre::Report> {
    match world.last_error.as_ref() {
        Some(ExtensionError::DuplicateIdentifier { .. }) => Ok(()),
        Some(other) => Err(eyre::eyre!("expected a duplicate identifier error, found {other}")),
        None => Err(eyre::eyre!("expected registration to fail")),
    }
}
