//! Base-product discovery against the package management target.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    phase::InstallPhase,
    target::{PkgTarget, Resolvable, ResolvableKind, ResolvableStatus},
};

/// Product type the target assigns to the primary operating-system product.
const BASE_PRODUCT_TYPE: &str = "base";

/// The product data handed over to the registration server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub arch: String,
    pub version: String,
}

impl From<Resolvable> for Product {
    fn from(resolvable: Resolvable) -> Self {
        Self {
            name: resolvable.name,
            arch: resolvable.arch,
            version: resolvable.version,
        }
    }
}

pub struct ProductDiscovery<'a, T: PkgTarget> {
    target: &'a T,
    phase: InstallPhase,
}

impl<'a, T: PkgTarget> ProductDiscovery<'a, T> {
    pub fn new(target: &'a T, phase: InstallPhase) -> Self {
        Self { target, phase }
    }

    /// The base products to register, projected down to name/arch/version.
    ///
    /// On a running system the base product is installed and carries a valid
    /// product type. During installation or upgrade the product is not
    /// committed yet, so the newer selected product is used instead; the
    /// base product by convention comes from the first repository. An empty
    /// result is not an error, callers decide how to proceed.
    pub fn base_products(&self) -> Vec<Product> {
        let phase = self.phase;
        let products: Vec<Product> = self
            .target
            .resolvables(ResolvableKind::Product)
            .into_iter()
            .filter(|product| is_base_product(product, phase))
            .map(Product::from)
            .collect();

        debug!(count = products.len(), "products to register: {products:?}");

        products
    }
}

fn is_base_product(resolvable: &Resolvable, phase: InstallPhase) -> bool {
    if phase.is_normal() {
        resolvable.status == ResolvableStatus::Installed
            && resolvable.product_type.as_deref() == Some(BASE_PRODUCT_TYPE)
    } else {
        resolvable.status == ResolvableStatus::Selected && resolvable.source == 0
    }
}
