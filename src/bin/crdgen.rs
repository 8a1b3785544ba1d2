//! Prints the CustomResourceDefinitions served by the controller as YAML.
//!
//! ```sh
//! cargo run --bin crdgen > config/crd/crds.yaml
//! ```

use fallback_origin_controller::crd::{FallbackOrigin, ProviderConfig};
use kube::CustomResourceExt;

fn main() -> anyhow::Result<()> {
    let crds = [FallbackOrigin::crd(), ProviderConfig::crd()];
    let documents = crds
        .iter()
        .map(serde_yaml::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    print!("{}", documents.join("---\n"));
    Ok(())
}
