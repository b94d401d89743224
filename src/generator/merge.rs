//! Template merging
//!
//! Injects the filtered proxies into the template and points the configured
//! proxy groups at them.

use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::models::{ProxyRecord, TemplateDocument};
use crate::utils::string::{random_alphanumeric, SUFFIX_LEN};

/// Give every record a unique, non-empty name
///
/// Records without a usable name become `proxy-<index>`. A name already seen
/// in this pass gets `-<8 random alphanumerics>` appended until it is unique.
/// Names that are already unique are left untouched.
///
/// # Returns
/// The final names, in record order
pub fn assign_unique_names<R: Rng>(proxies: &mut [ProxyRecord], rng: &mut R) -> Vec<String> {
    let mut seen = HashSet::with_capacity(proxies.len());
    let mut names = Vec::with_capacity(proxies.len());

    for (index, proxy) in proxies.iter_mut().enumerate() {
        let mut name = match proxy.usable_name() {
            Some(name) => name.to_string(),
            None => format!("proxy-{}", index),
        };

        if seen.contains(&name) {
            let base = name;
            name = loop {
                let candidate = format!("{}-{}", base, random_alphanumeric(rng, SUFFIX_LEN));
                if !seen.contains(&candidate) {
                    break candidate;
                }
            };
            debug!("Renamed duplicate proxy '{}' to '{}'", base, name);
        }

        if proxy.name.as_deref() != Some(name.as_str()) {
            proxy.set_name(name.clone());
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}

/// Merge the proxies into the template
///
/// Replaces the template's `proxies` and rewrites every group whose name is in
/// `apply_groups` to list all proxy names.
///
/// # Returns
/// The unique proxy names written to the template
pub fn merge_template<R: Rng>(
    template: &mut TemplateDocument,
    mut proxies: Vec<ProxyRecord>,
    apply_groups: &HashSet<String>,
    rng: &mut R,
) -> Vec<String> {
    let names = assign_unique_names(&mut proxies, rng);
    template.set_proxies(&proxies);
    let rewritten = template.apply_group_proxies(apply_groups, &names);
    debug!(
        "Merged {} proxies, rewrote {} proxy groups",
        names.len(),
        rewritten
    );
    names
}
