//! DI registry (spec §4.10, C10): a single process-wide registry mapping
//! `(edifact_format, format_version)` to a logic bundle, built through an
//! explicit builder rather than a config file (spec §9 "Global
//! registry": "encapsulate this as an explicit `Context` struct... a
//! thin module-level singleton may exist for convenience but must not
//! be load-bearing").

use crate::traits::{FcEvaluator, HintsProvider, PackageResolver, RcEvaluator};
use indexmap::IndexMap;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

/// The edifact message types accepted (spec §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdifactFormat {
    Aperak,
    Comdis,
    Contrl,
    Iftsta,
    Insrpt,
    Invoic,
    Mscons,
    Ordchg,
    Orders,
    Ordrsp,
    Pricat,
    Quotes,
    Remadv,
    Reqote,
    Partin,
    Utilmd,
    Utilmdg,
    Utilmds,
    Utilmdw,
    Utilts,
}

impl EdifactFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            EdifactFormat::Aperak => "APERAK",
            EdifactFormat::Comdis => "COMDIS",
            EdifactFormat::Contrl => "CONTRL",
            EdifactFormat::Iftsta => "IFTSTA",
            EdifactFormat::Insrpt => "INSRPT",
            EdifactFormat::Invoic => "INVOIC",
            EdifactFormat::Mscons => "MSCONS",
            EdifactFormat::Ordchg => "ORDCHG",
            EdifactFormat::Orders => "ORDERS",
            EdifactFormat::Ordrsp => "ORDRSP",
            EdifactFormat::Pricat => "PRICAT",
            EdifactFormat::Quotes => "QUOTES",
            EdifactFormat::Remadv => "REMADV",
            EdifactFormat::Reqote => "REQOTE",
            EdifactFormat::Partin => "PARTIN",
            EdifactFormat::Utilmd => "UTILMD",
            EdifactFormat::Utilmdg => "UTILMDG",
            EdifactFormat::Utilmds => "UTILMDS",
            EdifactFormat::Utilmdw => "UTILMDW",
            EdifactFormat::Utilts => "UTILTS",
        }
    }
}

impl fmt::Display for EdifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The four collaborators C9 needs to drive one AHB expression (spec
/// §4.10 "a RC evaluator, an FC evaluator, a hints provider, and a
/// package resolver").
#[derive(Clone)]
pub struct LogicBundle {
    pub rc_evaluator: Arc<dyn RcEvaluator>,
    pub fc_evaluator: Arc<dyn FcEvaluator>,
    pub hints_provider: Arc<dyn HintsProvider>,
    pub package_resolver: Arc<dyn PackageResolver>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormatVersion {
    pub format: EdifactFormat,
    pub version: &'static str,
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.format, self.version)
    }
}

/// An immutable, atomically-replaceable map from `(format, version)` to
/// its logic bundle (spec §4.10: "Registries are replaceable atomically
/// between evaluation runs").
#[derive(Clone, Default)]
pub struct Registry {
    bundles: IndexMap<FormatVersion, LogicBundle>,
}

impl Registry {
    pub fn get(&self, key: FormatVersion) -> Option<&LogicBundle> {
        self.bundles.get(&key)
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }
}

#[derive(Default)]
pub struct RegistryBuilder {
    bundles: IndexMap<FormatVersion, LogicBundle>,
}

impl RegistryBuilder {
    pub fn register(mut self, key: FormatVersion, bundle: LogicBundle) -> Self {
        self.bundles.insert(key, bundle);
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            bundles: self.bundles,
        }
    }
}

static GLOBAL_REGISTRY: OnceLock<RwLock<Registry>> = OnceLock::new();

/// A convenience process-wide registry. Not load-bearing: nothing in
/// this crate reads from it internally, every evaluator function here
/// takes its `Registry`/`LogicBundle` explicitly. Callers that want a
/// single ambient registry may use this instead of threading one
/// through their own call stack (spec §9).
pub fn global_registry() -> &'static RwLock<Registry> {
    GLOBAL_REGISTRY.get_or_init(|| RwLock::new(Registry::default()))
}

/// Atomically swaps the global registry's contents.
pub fn set_global_registry(registry: Registry) {
    *global_registry().write().expect("registry lock poisoned") = registry;
}
