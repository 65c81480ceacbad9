//! Whole-table save and load.
//!
//! The table is written as a single JSON list of `{ "state": ..., "values": [...] }`
//! entries. Saving goes through a temporary file in the destination directory
//! that is renamed over the target, so an interrupted save never leaves a
//! truncated table behind. Loading parses and checks every entry before the
//! caller's table is touched.

use std::collections::HashMap;
use std::fs::File;
use std::hash::Hash;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::agent::QLearningAgent;
use super::q_table::QTable;
use crate::error::{Error, Result};

#[derive(Serialize)]
struct EntryRef<'a, S> {
    state: &'a S,
    values: &'a [f32],
}

#[derive(Deserialize)]
struct Entry<S> {
    state: S,
    values: Vec<f32>,
}

impl<S> QTable<S>
where
    S: Clone + Eq + Hash + Serialize,
{
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file =
            NamedTempFile::new_in(dir).map_err(|e| Error::io("create temporary file in", dir, e))?;
        {
            let mut writer = BufWriter::new(file.as_file_mut());
            let entries: Vec<EntryRef<'_, S>> = self
                .iter()
                .map(|(state, values)| EntryRef { state, values })
                .collect();
            serde_json::to_writer(&mut writer, &entries)?;
            writer.flush().map_err(|e| Error::io("write", path, e))?;
        }
        file.as_file()
            .sync_all()
            .map_err(|e| Error::io("sync", path, e))?;
        file.persist(path)
            .map_err(|e| Error::io("replace", path, e.error))?;

        debug!(path = %path.display(), states = self.len(), "saved action-value table");
        Ok(())
    }
}

impl<S> QTable<S>
where
    S: Clone + Eq + Hash + DeserializeOwned,
{
    /// Reads a table saved by [`QTable::save`]. Every row must hold exactly
    /// `n_actions` values.
    pub fn load<P: AsRef<Path>>(path: P, n_actions: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io("open", path, e))?;
        let entries: Vec<Entry<S>> = serde_json::from_reader(BufReader::new(file))?;

        let mut rows = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            if entry.values.len() != n_actions {
                return Err(Error::MalformedTable {
                    entry: index,
                    expected: n_actions,
                    got: entry.values.len(),
                });
            }
            rows.insert(entry.state, entry.values);
        }
        Ok(QTable::from_rows(n_actions, rows))
    }
}

impl<S> QLearningAgent<S>
where
    S: Clone + Eq + Hash + Serialize + DeserializeOwned,
{
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.table.save(path)
    }

    /// Replaces the agent's table with the one stored at `path`.
    ///
    /// On error the current table is left as it was.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let table = QTable::load(path, self.table.n_actions())?;
        info!(path = %path.display(), states = table.len(), "loaded action-value table");
        self.table = table;
        Ok(())
    }
}
