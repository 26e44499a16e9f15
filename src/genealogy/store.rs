use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use super::model::{Family, GenealogyData, Member, Surname};
use super::seed::initial_data;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read genealogy data from {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write genealogy data to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("genealogy data at {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize genealogy data: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Synchronous JSON-file record store. Every call reads the document fresh,
/// so callers always see the last write.
#[derive(Clone, Debug)]
pub struct GenealogyStore {
    path: PathBuf,
}

impl GenealogyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole dataset, seeding the file on first use.
    pub fn load(&self) -> StoreResult<GenealogyData> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no data file yet, writing initial dataset");
            let data = initial_data();
            self.write(&data)?;
            return Ok(data);
        }

        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let data: GenealogyData =
            serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            surnames = data.surnames.len(),
            families = data.families.len(),
            members = data.members.len(),
            "loaded genealogy data"
        );
        Ok(data)
    }

    pub fn write(&self, data: &GenealogyData) -> StoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, content).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn update(&self, apply: impl FnOnce(&mut GenealogyData)) -> StoreResult<()> {
        let mut data = self.load()?;
        apply(&mut data);
        self.write(&data)
    }

    pub fn members(&self) -> StoreResult<Vec<Member>> {
        Ok(self.load()?.members)
    }

    pub fn families(&self) -> StoreResult<Vec<Family>> {
        Ok(self.load()?.families)
    }

    pub fn surnames(&self) -> StoreResult<Vec<Surname>> {
        Ok(self.load()?.surnames)
    }

    pub fn save_surname(&self, surname: Surname) -> StoreResult<()> {
        debug!(id = %surname.id, "saving surname");
        self.update(|data| data.upsert_surname(surname))
    }

    pub fn delete_surname(&self, id: &str) -> StoreResult<()> {
        info!(id, "deleting surname");
        self.update(|data| {
            data.remove_surname(id);
        })
    }

    pub fn save_family(&self, family: Family) -> StoreResult<()> {
        debug!(id = %family.id, "saving family");
        self.update(|data| data.upsert_family(family))
    }

    pub fn delete_family(&self, id: &str) -> StoreResult<()> {
        self.update(|data| {
            let removed = data.remove_family(id);
            info!(id, removed_members = removed, "deleted family");
        })
    }

    pub fn save_member(&self, member: Member) -> StoreResult<()> {
        debug!(id = %member.id, family = %member.family_id, "saving member");
        self.update(|data| data.upsert_member(member))
    }

    pub fn delete_member(&self, id: &str) -> StoreResult<()> {
        info!(id, "deleting member");
        self.update(|data| {
            data.remove_member(id);
        })
    }
}

/// Fresh id namespaced by entity kind, e.g. `m_1718000000000_k3x9a`.
pub fn generate_id(prefix: &str) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::thread_rng();
    let suffix = (0..5)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect::<String>();
    format!("{prefix}_{millis}_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genealogy::Gender;

    fn temp_store() -> (tempfile::TempDir, GenealogyStore) {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = GenealogyStore::new(dir.path().join("nested").join("data.json"));
        (dir, store)
    }

    #[test]
    fn test_first_load_writes_seed() {
        let (_dir, store) = temp_store();
        let data = store.load().expect("seeded load");

        assert!(store.path().exists());
        assert!(!data.families.is_empty());
        assert_eq!(store.load().expect("reload"), data);
    }

    #[test]
    fn test_save_member_then_reload() {
        let (_dir, store) = temp_store();
        store.write(&GenealogyData::default()).expect("empty document");

        let mut member = Member::new(generate_id("m"), "f", "Ada");
        member.gender = Gender::Female;
        store.save_member(member.clone()).expect("save");

        assert_eq!(store.members().expect("members"), vec![member.clone()]);

        member.bio = "updated".into();
        store.save_member(member.clone()).expect("upsert");
        assert_eq!(store.members().expect("members"), vec![member]);
    }

    #[test]
    fn test_delete_member_cascades_through_store() {
        let (_dir, store) = temp_store();
        let data = store.load().expect("seeded load");
        let patriarch = data
            .members
            .iter()
            .find(|member| member.spouse_ids.len() > 1)
            .cloned()
            .expect("seed has a multi-spouse member");

        store.delete_member(&patriarch.id).expect("delete");

        let members = store.members().expect("members");
        assert!(members.iter().all(|member| member.id != patriarch.id));
        assert!(members.iter().all(|member| {
            member.father_id.as_deref() != Some(patriarch.id.as_str())
                && !member.spouse_ids.contains(&patriarch.id)
        }));
    }

    #[test]
    fn test_delete_family_removes_members() {
        let (_dir, store) = temp_store();
        let data = store.load().expect("seeded load");
        let family_id = data.families[0].id.clone();

        store.delete_family(&family_id).expect("delete");

        assert!(store.families().expect("families").iter().all(|f| f.id != family_id));
        assert!(store.members().expect("members").iter().all(|m| m.family_id != family_id));
    }

    #[test]
    fn test_corrupt_file_is_a_parse_error() {
        let (_dir, store) = temp_store();
        store.write(&GenealogyData::default()).expect("write");
        fs::write(store.path(), "{ not json").expect("corrupt");

        assert!(matches!(store.load(), Err(StoreError::Parse { .. })));
    }

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id("f");
        let parts = id.split('_').collect::<Vec<_>>();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "f");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 5);
        assert_ne!(generate_id("f"), generate_id("f"));
    }
}
