//! Generator configuration.
//!
//! Loaded from TOML by the host; every key is optional and falls back to the
//! generator defaults:
//!
//! ```toml
//! package_name = "PetStore"
//! flavor = "client"
//! enum_name_extensions = ["x-enumNames"]
//! add_auth = "BearerAuth"
//!
//! [[object_params]]
//! name = "filter"
//! base_type = "FilterSpec"
//! ```

use serde::Deserialize;

use crate::error::Result;

/// Default package name for generated clients.
pub const DEFAULT_PACKAGE_NAME: &str = "OpenAPIClientPackage";

/// Default version stamped into generated packages.
pub const DEFAULT_PACKAGE_VERSION: &str = "3.0.0";

/// Extension key carrying enum display names.
pub const ENUM_NAMES_EXTENSION: &str = "x-enumNames";

/// Generated helper class wrapping map-valued properties.
const MAP_CONTAINER_CLASS: &str = "JSONMapperMap";

/// Which side of the API is being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Client library calling the API.
    #[default]
    Client,
    /// Server skeleton implementing the API.
    Server,
}

impl Flavor {
    /// Sub-package holding the generated API classes.
    pub fn api_package(self) -> &'static str {
        match self {
            Flavor::Client => "api",
            Flavor::Server => "impl",
        }
    }
}

/// A parameter that must be passed as an object of the given type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectParam {
    /// Parameter name as declared or as sanitized.
    pub name: String,
    /// Class the parameter is passed as.
    pub base_type: String,
}

/// Settings for one generation run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Dotted MATLAB package the generated code lives in.
    pub package_name: String,
    /// Version stamped into the generated package.
    pub package_version: String,
    /// Client or server generation.
    pub flavor: Flavor,
    /// Sub-package holding the generated models.
    pub model_package: String,
    /// Extension keys consulted, in order, for enum display names. First present key wins.
    pub enum_name_extensions: Vec<String>,
    /// Auth method added to every client operation that declares none.
    pub add_auth: Option<String>,
    /// Parameters to be passed as objects of a given class.
    pub object_params: Vec<ObjectParam>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            package_version: DEFAULT_PACKAGE_VERSION.to_string(),
            flavor: Flavor::default(),
            model_package: "models".to_string(),
            enum_name_extensions: vec![ENUM_NAMES_EXTENSION.to_string()],
            add_auth: None,
            object_params: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Package-qualified map container type, e.g. `PetStore.JSONMapperMap`.
    pub fn map_container_type(&self) -> String {
        format!("{}.{MAP_CONTAINER_CLASS}", self.package_name)
    }

    /// Package-qualified API package, e.g. `PetStore.api`.
    pub fn api_package(&self) -> String {
        format!("{}.{}", self.package_name, self.flavor.api_package())
    }

    /// Package-qualified model package, e.g. `PetStore.models`.
    pub fn model_package(&self) -> String {
        format!("{}.{}", self.package_name, self.model_package)
    }

    /// First segment of a dotted package name.
    pub fn top_level_package(&self) -> &str {
        self.package_name
            .split('.')
            .next()
            .unwrap_or(&self.package_name)
    }

    /// Root used for error and warning identifiers, e.g. `Org:PetStore`.
    pub fn error_identifier_root(&self) -> String {
        self.package_name.replace('.', ":")
    }
}
