use crate::model::Registry;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge le registre (médecins + hôpitaux) depuis un support.
    fn load(&self) -> anyhow::Result<Registry>;
    /// Sauvegarde de manière atomique.
    fn save(&self, registry: &Registry) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Registre vide si le fichier n'existe pas encore.
    pub fn load_or_default(&self) -> anyhow::Result<Registry> {
        if !self.path.exists() {
            return Ok(Registry::default());
        }
        self.load()
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Registry> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let registry: Registry = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(registry)
    }

    fn save(&self, registry: &Registry) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(registry)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Doctor, Hospital};
    use tempfile::tempdir;

    #[test]
    fn save_then_load_keeps_documents() {
        let dir = tempdir().unwrap();
        let storage = JsonStorage::open(dir.path().join("registry.json")).unwrap();
        assert!(storage.load_or_default().unwrap().doctors.is_empty());

        let mut registry = Registry::default();
        registry.hospitals.push(Hospital::new("Central"));
        registry.doctors.push(Doctor::new("Dr Who", vec!["general".into()]));
        storage.save(&registry).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.hospitals, registry.hospitals);
        assert_eq!(loaded.doctors, registry.doctors);
    }
}
