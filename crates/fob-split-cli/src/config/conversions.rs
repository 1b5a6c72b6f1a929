use fob_split::{ManifestOptions, NamingOptions, RuleNamer, SplitOptions};

use crate::config::SplitConfig;
use crate::error::Result;

impl SplitConfig {
    /// Pipeline options for [`fob_split::Splitter`].
    pub fn split_options(&self) -> SplitOptions {
        SplitOptions {
            root_group: self.root_group.clone(),
            naming: NamingOptions {
                root_package: self.root_package.clone(),
                package_names: self.package_names.clone(),
                scope: self.scope.clone(),
                max_joined_name_length: self.max_joined_name_length,
            },
            allow: self.allow.clone(),
        }
    }

    pub fn manifest_options(&self) -> ManifestOptions {
        ManifestOptions {
            versions: self.versions.clone(),
            link_siblings: self.link_siblings,
            sibling_range: self.sibling_range.clone(),
        }
    }

    /// Compile the naming rules into a group namer.
    pub fn namer(&self) -> Result<RuleNamer> {
        Ok(self.naming.compile()?)
    }
}
