use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::assets::AssetDirs;
use crate::config::Config;
use crate::engine::command::{Command, CommandKind};
use crate::foundation::error::{LedError, LedResult};
use crate::renderers::Renderer;

/// Shared inputs renderer constructors draw from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resources {
    pub assets: AssetDirs,
    /// BDF font for text dashboards.
    pub font: PathBuf,
}

impl Resources {
    pub fn from_config(config: &Config) -> Self {
        Self {
            assets: config.assets.dirs(),
            font: config.dashboards.font.clone(),
        }
    }
}

/// Builds a renderer for a name. Receives the name so fallbacks can resolve it.
pub type Constructor =
    Arc<dyn Fn(&Resources, &str) -> LedResult<Box<dyn Renderer>> + Send + Sync>;

#[derive(Clone, Default)]
struct KindTable {
    named: BTreeMap<String, Constructor>,
    fallback: Option<Constructor>,
}

/// Name → constructor tables, one per [`CommandKind`].
///
/// Exact names win; a kind may also carry a fallback that receives any other name (asset
/// loaders, the playground).
#[derive(Clone, Default)]
pub struct Registry {
    resources: Resources,
    tables: BTreeMap<CommandKind, KindTable>,
}

impl Registry {
    pub fn new(resources: Resources) -> Self {
        Self {
            resources,
            tables: BTreeMap::new(),
        }
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Register `ctor` under `(kind, name)`, replacing any previous entry.
    pub fn register<F>(&mut self, kind: CommandKind, name: impl Into<String>, ctor: F) -> &mut Self
    where
        F: Fn(&Resources, &str) -> LedResult<Box<dyn Renderer>> + Send + Sync + 'static,
    {
        self.tables
            .entry(kind)
            .or_default()
            .named
            .insert(name.into(), Arc::new(ctor));
        self
    }

    /// Register the constructor used for names of `kind` without an exact entry.
    pub fn register_fallback<F>(&mut self, kind: CommandKind, ctor: F) -> &mut Self
    where
        F: Fn(&Resources, &str) -> LedResult<Box<dyn Renderer>> + Send + Sync + 'static,
    {
        self.tables.entry(kind).or_default().fallback = Some(Arc::new(ctor));
        self
    }

    /// Build the renderer for `command`.
    pub fn resolve(&self, command: &Command) -> LedResult<Box<dyn Renderer>> {
        let table = self.tables.get(&command.kind);
        let ctor = table
            .and_then(|t| t.named.get(&command.name).or(t.fallback.as_ref()))
            .ok_or_else(|| {
                LedError::resolution(format!(
                    "no {} named '{}'",
                    command.kind, command.name
                ))
            })?;
        ctor(&self.resources, &command.name)
    }

    /// Exact names registered for `kind`, sorted.
    pub fn names(&self, kind: CommandKind) -> Vec<&str> {
        self.tables
            .get(&kind)
            .map(|t| t.named.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether `kind` accepts names beyond [`names`](Self::names).
    pub fn has_fallback(&self, kind: CommandKind) -> bool {
        self.tables
            .get(&kind)
            .is_some_and(|t| t.fallback.is_some())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (kind, table) in &self.tables {
            map.entry(&kind.as_str(), &table.named.keys().collect::<Vec<_>>());
        }
        map.finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/registry.rs"]
mod tests;
