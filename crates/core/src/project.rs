//! The on-disk project registry.
//!
//! Projects are named collections of repositories, persisted as YAML at
//! `~/.quarry/projects.yaml`. The registry preserves insertion order so
//! listings stay stable across edits.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::discovery::RepositoryInput;

/// A named collection of repositories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub repositories: Vec<RepositoryInput>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: impl Into<String>, repositories: Vec<RepositoryInput>) -> Self {
        Self {
            name: name.into(),
            repositories,
            created_at: Utc::now(),
        }
    }
}

/// YAML-backed project registry.
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    /// Registry at the default location, `~/.quarry/projects.yaml`.
    pub fn open_default() -> Result<Self> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(Self::at(home.join(".quarry").join("projects.yaml")))
    }

    /// Registry at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all projects. A missing file is an empty registry.
    pub fn load(&self) -> Result<IndexMap<String, Project>> {
        if !self.path.exists() {
            return Ok(IndexMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    fn save(&self, projects: &IndexMap<String, Project>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let raw = serde_yaml::to_string(projects)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    /// Register a project. Fails if the name is taken or the project has no
    /// repositories.
    pub fn add(&self, project: Project) -> Result<()> {
        if project.repositories.is_empty() {
            bail!("Project '{}' has no repositories", project.name);
        }
        let mut projects = self.load()?;
        if projects.contains_key(&project.name) {
            bail!("Project '{}' already exists", project.name);
        }
        projects.insert(project.name.clone(), project);
        self.save(&projects)
    }

    pub fn get(&self, name: &str) -> Result<Option<Project>> {
        let mut projects = self.load()?;
        Ok(projects.shift_remove(name))
    }

    /// Remove a project. Returns false if it did not exist.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let mut projects = self.load()?;
        if projects.shift_remove(name).is_none() {
            return Ok(false);
        }
        self.save(&projects)?;
        Ok(true)
    }
}
