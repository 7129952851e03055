use std::collections::{btree_map::Entry, BTreeMap};

use anyhow::bail;
use libq8isa::Byte;
use patch::MemoryPatch;

pub mod patch;


pub type MainMemory = Memory<{ libq8isa::MEMORY_SIZE }>;
pub type RegFile = Memory<{ libq8isa::REGISTER_COUNT }>;

/// Byte addressed storage. Accesses never fail: reading past the end yields 0 and storing past
/// the end does nothing.
pub trait Storage {
    fn read(&self, addr: usize) -> Byte;

    fn store(&mut self, addr: usize, value: Byte);

    fn size(&self) -> usize;

    fn snapshot(&self) -> Vec<Byte> {
        (0..self.size()).map(|addr| self.read(addr)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory<const SIZE: usize> {
    data: [Byte; SIZE],
    patches: BTreeMap<usize, MemoryPatch>,
}

impl<const SIZE: usize> Memory<SIZE> {
    pub fn new() -> Self {
        Self {
            data: [0; SIZE],
            patches: BTreeMap::new(),
        }
    }

    /// Creates memory holding the given data, zero filled up to its size.
    pub fn new_with_data<I>(data: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = Byte>,
    {
        let data: Vec<_> = data.into_iter().collect();

        if data.len() > SIZE {
            bail!(
                "Given data ({} bytes) exceeds memory size ({} bytes)",
                data.len(),
                SIZE
            );
        }

        let mut memory = Self::new();
        memory.data[..data.len()].copy_from_slice(&data);

        Ok(memory)
    }

    pub fn iter(&self) -> impl Iterator<Item = Byte> + '_ {
        self.data.iter().copied()
    }

    pub fn as_slice(&self) -> &[Byte] {
        &self.data
    }

    /// Takes every change made since the last call, ordered by address.
    pub fn pop_patches(&mut self) -> impl Iterator<Item = (usize, MemoryPatch)> {
        std::mem::take(&mut self.patches).into_iter()
    }

    pub fn clear_patches(&mut self) {
        self.patches.clear();
    }

    fn record_patch(&mut self, addr: usize, old_value: Byte, new_value: Byte) {
        match self.patches.entry(addr) {
            Entry::Occupied(mut entry) => {
                // Changed back to what it was before the first patch, nothing to report anymore.
                if entry.get().old_value == new_value {
                    entry.remove();
                } else {
                    entry.get_mut().new_value = new_value;
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(MemoryPatch {
                    old_value,
                    new_value,
                });
            }
        }
    }
}

impl<const SIZE: usize> Storage for Memory<SIZE> {
    fn read(&self, addr: usize) -> Byte {
        self.data.get(addr).copied().unwrap_or(0)
    }

    fn store(&mut self, addr: usize, value: Byte) {
        let Some(cell) = self.data.get_mut(addr) else {
            return;
        };

        let old_value = *cell;
        if old_value == value {
            return;
        }

        *cell = value;
        self.record_patch(addr, old_value, value);
    }

    fn size(&self) -> usize {
        SIZE
    }

    fn snapshot(&self) -> Vec<Byte> {
        self.iter().collect()
    }
}

impl<const SIZE: usize> Default for Memory<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}
