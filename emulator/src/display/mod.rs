use libq8emulator::memory::{patch::MemoryPatch, Storage};


pub const BYTES_PER_ROW: usize = 16;

/// Hex dump of `len` bytes starting at `begin`, 16 per row, each row prefixed with its address.
pub fn memory_dump<S>(memory: &S, begin: usize, len: usize) -> String
where
    S: Storage + ?Sized,
{
    let end = begin.saturating_add(len).min(memory.size());
    let mut dump = String::new();

    for row_begin in (begin..end).step_by(BYTES_PER_ROW) {
        let row_end = (row_begin + BYTES_PER_ROW).min(end);

        let bytes: Vec<_> = (row_begin..row_end)
            .map(|addr| format!("{:02X}", memory.read(addr)))
            .collect();

        dump.push_str(&format!("{:02X}: {}\n", row_begin, bytes.join(" ")));
    }

    dump
}

pub fn register_dump<S>(reg_file: &S) -> String
where
    S: Storage + ?Sized,
{
    (0..reg_file.size())
        .map(|index| format!("R{}: {:02X}\n", index, reg_file.read(index)))
        .collect()
}

pub fn register_patches<I>(patches: I) -> String
where
    I: IntoIterator<Item = (usize, MemoryPatch)>,
{
    patches
        .into_iter()
        .map(|(index, patch)| {
            format!(
                "R{}: {:02X} -> {:02X}\n",
                index, patch.old_value, patch.new_value
            )
        })
        .collect()
}

pub fn memory_patches<I>(patches: I) -> String
where
    I: IntoIterator<Item = (usize, MemoryPatch)>,
{
    patches
        .into_iter()
        .map(|(addr, patch)| {
            format!(
                "[{:02X}]: {:02X} -> {:02X}\n",
                addr, patch.old_value, patch.new_value
            )
        })
        .collect()
}
