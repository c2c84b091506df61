use slotmap::new_key_type;

new_key_type! {
    pub struct VolumeId;
}

/// Index of a table registered with a [`TableSink`](crate::core::io::sink::TableSink).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TableId(pub usize);

pub type EventId = i32;
pub type TrackId = i32;
