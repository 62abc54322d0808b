//! Given steps for capability registry BDD scenarios.

use super::world::RegistryWorld;
use capability_registry::extension::domain::CapabilityDescriptor;
use rstest_bdd_macros::given;

#[given(r#"the formatter descriptor lists "{entry}""#)]
fn descriptor_lists(world: &mut RegistryWorld, entry: String) {
    world.listing.push(entry);
}

#[given(r#"the formatter capability defaults to "{identifier}" as a singleton"#)]
fn singleton_capability(world: &mut RegistryWorld, identifier: String) {
    world.descriptor = Some(CapabilityDescriptor::singleton(identifier));
}

#[given(r#"the formatter capability defaults to "{identifier}" as a prototype"#)]
fn prototype_capability(world: &mut RegistryWorld, identifier: String) {
    world.descriptor = Some(CapabilityDescriptor::prototype(identifier));
}
