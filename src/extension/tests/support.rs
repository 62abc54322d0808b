//! Capabilities, implementations and fixtures shared by the extension tests.

use crate::extension::{
    adapters::{TypeCatalog, memory::InMemoryResourceProvider},
    domain::{Capability, CapabilityDescriptor, ImplementationDescriptor, ImplementationType},
    services::{DiscoveryContext, RegistryDirectory},
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const CODEC_PATH: &str = "META-INF/services/test.codec.Codec";

pub const CODEC_LISTING: &str = "\
# codecs shipped with the test host
test.codec.JsonCodec
test.codec.PlainCodec   # no descriptor

test.codec.XmlCodec
test.codec.YamlCodec
";

pub trait Codec: Send + Sync {
    fn label(&self) -> &'static str;
}

impl Capability for dyn Codec {
    const NAME: &'static str = "test.codec.Codec";
}

pub trait Compressor: Send + Sync {}

impl Capability for dyn Compressor {
    const NAME: &'static str = "test.codec.Compressor";
}

pub trait Undeclared: Send + Sync {}

impl Capability for dyn Undeclared {
    const NAME: &'static str = "test.codec.Undeclared";
}

#[derive(Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn label(&self) -> &'static str {
        "json"
    }
}

#[derive(Default)]
pub struct XmlCodec;

impl Codec for XmlCodec {
    fn label(&self) -> &'static str {
        "xml"
    }
}

#[derive(Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn label(&self) -> &'static str {
        "yaml"
    }
}

#[derive(Default)]
pub struct PlainCodec;

impl Codec for PlainCodec {
    fn label(&self) -> &'static str {
        "plain"
    }
}

#[derive(Default)]
pub struct CsvCodec;

impl Codec for CsvCodec {
    fn label(&self) -> &'static str {
        "csv"
    }
}

#[derive(Default)]
pub struct Gzip;

impl Compressor for Gzip {}

pub fn codec<C>(name: &str) -> ImplementationType
where
    C: Codec + Default + 'static,
{
    ImplementationType::builder::<C>(name)
        .with_default_constructor()
        .satisfies::<dyn Codec>(|instance| instance)
        .build()
        .expect("valid type name")
}

pub fn described_codec<C>(name: &str, descriptor: ImplementationDescriptor) -> ImplementationType
where
    C: Codec + Default + 'static,
{
    ImplementationType::builder::<C>(name)
        .with_descriptor(descriptor)
        .with_default_constructor()
        .satisfies::<dyn Codec>(|instance| instance)
        .build()
        .expect("valid type name")
}

/// Codec type whose constructor counts its invocations.
pub fn counted_codec(name: &str, identifier: &str, counter: Arc<AtomicUsize>) -> ImplementationType {
    ImplementationType::builder::<JsonCodec>(name)
        .with_descriptor(ImplementationDescriptor::new().with_identifier(identifier))
        .with_constructor(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            JsonCodec
        })
        .satisfies::<dyn Codec>(|instance| instance)
        .build()
        .expect("valid type name")
}

pub fn gzip() -> ImplementationType {
    ImplementationType::builder::<Gzip>("test.codec.Gzip")
        .with_default_constructor()
        .satisfies::<dyn Compressor>(|instance| instance)
        .build()
        .expect("valid type name")
}

/// Catalog declaring the codec capability and four codecs:
///
/// | identifier   | order | categories         |
/// |--------------|-------|--------------------|
/// | `json`       | 20    | text, structured   |
/// | `xml`        | 10    | structured         |
/// | `YamlCodec`  | 10    | text               |
/// | `PlainCodec` | none  | none               |
pub fn codec_catalog(descriptor: CapabilityDescriptor) -> TypeCatalog {
    TypeCatalog::new()
        .with_capability::<dyn Codec>(descriptor)
        .with_capability::<dyn Compressor>(CapabilityDescriptor::singleton("Gzip"))
        .with_type(described_codec::<JsonCodec>(
            "test.codec.JsonCodec",
            ImplementationDescriptor::new()
                .with_identifier("json")
                .with_order(20)
                .with_categories(["text", "structured"]),
        ))
        .with_type(described_codec::<XmlCodec>(
            "test.codec.XmlCodec",
            ImplementationDescriptor::new()
                .with_identifier("xml")
                .with_order(10)
                .with_categories(["structured"]),
        ))
        .with_type(described_codec::<YamlCodec>(
            "test.codec.YamlCodec",
            ImplementationDescriptor::new()
                .with_order(10)
                .with_categories(["text"]),
        ))
        .with_type(codec::<PlainCodec>("test.codec.PlainCodec"))
        .with_type(gzip())
}

pub fn codec_resources() -> InMemoryResourceProvider {
    InMemoryResourceProvider::new().with_resource(CODEC_PATH, "memory:codecs", CODEC_LISTING)
}

pub fn directory_with(resources: InMemoryResourceProvider, catalog: TypeCatalog) -> RegistryDirectory {
    RegistryDirectory::new(DiscoveryContext::with_catalog(
        Arc::new(resources),
        Arc::new(catalog),
    ))
}

pub fn codec_directory(descriptor: CapabilityDescriptor) -> RegistryDirectory {
    directory_with(codec_resources(), codec_catalog(descriptor))
}

pub fn labels(codecs: &[Arc<dyn Codec>]) -> Vec<&'static str> {
    codecs.iter().map(|codec| codec.label()).collect()
}
