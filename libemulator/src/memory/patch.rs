use libq8isa::Byte;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryPatch {
    pub old_value: Byte,
    pub new_value: Byte,
}
