//! When steps for capability registry BDD scenarios.

use super::world::RegistryWorld;
use crate::test_helpers::{Formatter, Upper};
use capability_registry::extension::domain::{ImplementationDescriptor, ImplementationType};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the formatter registry is requested")]
fn registry_requested(world: &mut RegistryWorld) -> Result<(), eyre::Report> {
    world.registry().map(|_| ())
}

#[when(r#"extension "{identifier}" is requested"#)]
fn extension_requested(world: &mut RegistryWorld, identifier: String) -> Result<(), eyre::Report> {
    let registry = world.registry()?;
    match registry.extension(&identifier) {
        Ok(found) => world.lookups.extend(found),
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}

#[when(r#"extension "{identifier}" is requested twice"#)]
fn extension_requested_twice(
    world: &mut RegistryWorld,
    identifier: String,
) -> Result<(), eyre::Report> {
    let registry = world.registry()?;
    for _ in 0..2 {
        let found = registry
            .extension(&identifier)
            .map_err(|err| eyre::eyre!("lookup failed: {err}"))?
            .ok_or_else(|| eyre::eyre!("no formatter registered as {identifier}"))?;
        world.lookups.push(found);
    }
    Ok(())
}

#[when(r#"the formatters in category "{category}" are listed"#)]
fn category_listed(world: &mut RegistryWorld, category: String) -> Result<(), eyre::Report> {
    let registry = world.registry()?;
    world.listed = registry
        .extensions(&category)
        .map_err(|err| eyre::eyre!("listing failed: {err}"))?;
    Ok(())
}

#[when(r#"another formatter is registered as "{identifier}""#)]
fn another_registered(world: &mut RegistryWorld, identifier: String) -> Result<(), eyre::Report> {
    let registry = world.registry()?;
    let rival = ImplementationType::builder::<Upper>("host.text.RivalUpper")
        .with_descriptor(ImplementationDescriptor::new().with_identifier(identifier))
        .with_default_constructor()
        .satisfies::<dyn Formatter>(|instance| instance)
        .build()
        .wrap_err("build rival formatter type")?;
    if let Err(err) = registry.add_extension_type(rival) {
        world.last_error = Some(err);
    }
    Ok(())
}
