use super::*;

use std::fs;
use std::path::Path;

/// The lookup artifact consumed by front ends:
/// one entry per state, sorted by key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolutionTable {
    entries: Vec<TableEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub key: u32,
    pub outcome: Outcome,
    /// `None` for draws.
    pub distance: Option<u32>,
    pub best_moves: Vec<Cell>,
}

/// key (4) + outcome (1) + distance (4) + best move bitmask (2)
const ENTRY_BYTES: usize = 11;

const NO_DISTANCE: u32 = u32::MAX;

impl Solver {
    /// The table of every reachable state, sentinels included.
    pub fn table(&self) -> SolutionTable {
        let mut entries: Vec<TableEntry> = self
            .graph()
            .ids()
            .map(|id| self.table_entry(id))
            .collect();

        entries.sort_unstable_by_key(|entry| entry.key);

        SolutionTable { entries }
    }

    /// The table restricted to `states`, which must all be reachable.
    pub fn table_for(&self, states: &StateSet) -> Result<SolutionTable> {
        let mut entries = Vec::with_capacity(states.len());
        let mut missing = None;

        states.visit_in_key_order(|state| match self.node_id(state) {
            Ok(id) => entries.push(self.table_entry(id)),
            Err(_) => {
                missing.get_or_insert(state);
            }
        });

        if let Some(state) = missing {
            return Err(Error::InvalidState { key: state.key() });
        }

        Ok(SolutionTable { entries })
    }

    fn table_entry(&self, id: NodeId) -> TableEntry {
        let state = self.graph().state(id);
        let best_moves = self
            .best_moves(state)
            .unwrap_or_else(|err| panic!("{err}\n\nSTATE:\n\n{}", state.pretty()));

        TableEntry {
            key: state.key(),
            outcome: self.outcome_of(id),
            distance: self.distance_of(id),
            best_moves,
        }
    }
}

impl SolutionTable {
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, state: State) -> Option<&TableEntry> {
        let key = state.key();
        self.entries
            .binary_search_by(|entry| entry.key.cmp(&key))
            .ok()
            .map(|i| &self.entries[i])
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<SolutionTable> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.entries.len() * ENTRY_BYTES);

        for entry in &self.entries {
            let outcome: u8 = match entry.outcome {
                Outcome::Win => 0,
                Outcome::Loss => 1,
                Outcome::Draw => 2,
            };
            let best_moves = entry
                .best_moves
                .iter()
                .fold(0u16, |mask, cell| mask | (1 << cell.0));

            bytes.extend_from_slice(&entry.key.to_le_bytes());
            bytes.push(outcome);
            bytes.extend_from_slice(&entry.distance.unwrap_or(NO_DISTANCE).to_le_bytes());
            bytes.extend_from_slice(&best_moves.to_le_bytes());
        }

        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<SolutionTable> {
        if bytes.len() % ENTRY_BYTES != 0 {
            return Err(Error::MalformedTable {
                reason: format!(
                    "length {} is not a multiple of {ENTRY_BYTES}",
                    bytes.len()
                ),
            });
        }

        let mut entries = Vec::with_capacity(bytes.len() / ENTRY_BYTES);

        for chunk in bytes.chunks_exact(ENTRY_BYTES) {
            let key = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            let state = State::from_key(key)?;

            let outcome = match chunk[4] {
                0 => Outcome::Win,
                1 => Outcome::Loss,
                2 => Outcome::Draw,
                other => {
                    return Err(Error::MalformedTable {
                        reason: format!("unknown outcome byte {other} for key {key:#x}"),
                    })
                }
            };

            let distance = u32::from_le_bytes([chunk[5], chunk[6], chunk[7], chunk[8]]);
            let distance = (distance != NO_DISTANCE).then_some(distance);

            let best_moves = u16::from_le_bytes([chunk[9], chunk[10]]);
            if best_moves & !state.free_cell_mask() != 0 {
                return Err(Error::MalformedTable {
                    reason: format!("best moves {best_moves:#011b} are not free in {key:#x}"),
                });
            }

            if entries
                .last()
                .is_some_and(|previous: &TableEntry| previous.key >= key)
            {
                return Err(Error::MalformedTable {
                    reason: format!("key {key:#x} is out of order"),
                });
            }

            entries.push(TableEntry {
                key,
                outcome,
                distance,
                best_moves: Cell::ALL
                    .into_iter()
                    .filter(|cell| best_moves & (1 << cell.0) != 0)
                    .collect(),
            });
        }

        Ok(SolutionTable { entries })
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = fs::File::create(path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        serde_json::to_writer(std::io::BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn write_bytes(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_bytes()).map_err(|source| Error::Io {
            operation: format!("write {}", path.display()),
            source,
        })
    }
}

impl State {
    /// Cells a move may go to. Empty for terminal sentinels.
    pub const fn free_cell_mask(self) -> u16 {
        if self.is_terminal() {
            return 0;
        }

        const BOARD: u16 = (1 << BOARD_CELLS) - 1;
        BOARD & !self.occupied_mask()
    }
}
