//! Shared capabilities and catalog for integration tests.

use capability_registry::extension::{
    adapters::TypeCatalog,
    domain::{Capability, CapabilityDescriptor, ImplementationDescriptor, ImplementationType},
};
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;

/// Resource path of the formatter capability under the default prefix.
pub const FORMATTER_PATH: &str = "META-INF/services/host.text.Formatter";

/// Text formatting capability served by the test host.
pub trait Formatter: Send + Sync {
    /// Formats `input`.
    fn format(&self, input: &str) -> String;
}

impl Capability for dyn Formatter {
    const NAME: &'static str = "host.text.Formatter";
}

/// Formatter producing upper case.
#[derive(Default)]
pub struct Upper;

impl Formatter for Upper {
    fn format(&self, input: &str) -> String {
        input.to_uppercase()
    }
}

/// Formatter producing lower case.
#[derive(Default)]
pub struct Lower;

impl Formatter for Lower {
    fn format(&self, input: &str) -> String {
        input.to_lowercase()
    }
}

/// Formatter returning its input unchanged.
#[derive(Default)]
pub struct Identity;

impl Formatter for Identity {
    fn format(&self, input: &str) -> String {
        input.to_owned()
    }
}

fn formatter<C>(name: &str, descriptor: ImplementationDescriptor) -> ImplementationType
where
    C: Formatter + Default + 'static,
{
    ImplementationType::builder::<C>(name)
        .with_descriptor(descriptor)
        .with_default_constructor()
        .satisfies::<dyn Formatter>(|instance| instance)
        .build()
        .expect("valid type name")
}

/// Catalog declaring the formatter capability and three formatters.
///
/// `upper` (order 1, category `case`), `lower` (order 2, category `case`) and
/// `Identity` (order 0, no category, bare-name identifier).
pub fn formatter_catalog(descriptor: CapabilityDescriptor) -> TypeCatalog {
    TypeCatalog::new()
        .with_capability::<dyn Formatter>(descriptor)
        .with_type(formatter::<Upper>(
            "host.text.Upper",
            ImplementationDescriptor::new()
                .with_identifier("upper")
                .with_order(1)
                .with_categories(["case"]),
        ))
        .with_type(formatter::<Lower>(
            "host.text.Lower",
            ImplementationDescriptor::new()
                .with_identifier("lower")
                .with_order(2)
                .with_categories(["case"]),
        ))
        .with_type(formatter::<Identity>(
            "host.text.Identity",
            ImplementationDescriptor::new(),
        ))
}

/// Returns the catalog wrapped for sharing with a discovery context.
pub fn shared_catalog(descriptor: CapabilityDescriptor) -> Arc<TypeCatalog> {
    Arc::new(formatter_catalog(descriptor))
}

/// Writes the formatter descriptor resource beneath `root`.
pub fn write_formatter_descriptor(root: &Utf8Path, content: &str) {
    let file = root.join(FORMATTER_PATH);
    let parent = file.parent().expect("descriptor path has a parent");
    std::fs::create_dir_all(parent).expect("create descriptor directory");
    std::fs::write(&file, content).expect("write descriptor");
}

/// Returns the UTF-8 path of a temporary directory.
pub fn utf8_path(dir: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("temporary path is UTF-8")
}
