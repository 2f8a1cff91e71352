/// Shared buffer layout.
/// Must stay in sync with the host page's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Volumes: max_volumes × 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// The host reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::api::types::{GameEvent, GameStatus};
use crate::bridge::instance::VolumeInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_VOLUMES: usize = 2;
pub const HEADER_VOLUME_COUNT: usize = 3;
pub const HEADER_MAX_EVENTS: usize = 4;
pub const HEADER_EVENT_COUNT: usize = 5;
pub const HEADER_PROTOCOL_VERSION: usize = 6;
pub const HEADER_LEVEL: usize = 7;
pub const HEADER_SCORE: usize = 8;
pub const HEADER_LIVES: usize = 9;
pub const HEADER_GAME_OVER: usize = 10;
pub const HEADER_ELAPSED: usize = 11;
// 12..16 reserved

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per volume instance: id, kind, min xyz, max xyz. Fixed wire format.
pub const VOLUME_FLOATS: usize = VolumeInstance::FLOATS;

/// Floats per game event: kind, a, b, c. Fixed wire format.
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum volume instances.
    pub max_volumes: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    /// Size of volume data section in floats.
    pub volume_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where volume data begins.
    pub volume_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_volumes: usize, max_events: usize) -> Self {
        let volume_data_floats = max_volumes * VOLUME_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let volume_data_offset = HEADER_FLOATS;
        let event_data_offset = volume_data_offset + volume_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_volumes,
            max_events,
            volume_data_floats,
            event_data_floats,
            volume_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_volumes, config.max_events)
    }

    /// Fill a header for one frame. Counts are clamped to the capacities.
    pub fn write_header(
        &self,
        header: &mut [f32; HEADER_FLOATS],
        frame: u64,
        volume_count: usize,
        event_count: usize,
        status: GameStatus,
        elapsed: f64,
    ) {
        header[HEADER_FRAME_COUNTER] = frame as f32;
        header[HEADER_MAX_VOLUMES] = self.max_volumes as f32;
        header[HEADER_VOLUME_COUNT] = volume_count.min(self.max_volumes) as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = event_count.min(self.max_events) as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_LEVEL] = status.level as f32;
        header[HEADER_SCORE] = status.score as f32;
        header[HEADER_LIVES] = status.lives as f32;
        header[HEADER_GAME_OVER] = if status.game_over { 1.0 } else { 0.0 };
        header[HEADER_ELAPSED] = elapsed as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());

        assert_eq!(layout.max_volumes, 512);
        assert_eq!(layout.max_events, 32);
        assert_eq!(layout.volume_data_floats, 512 * 8);
        assert_eq!(layout.event_data_floats, 32 * 4);
        assert_eq!(layout.volume_data_offset, 16);
        assert_eq!(layout.event_data_offset, 16 + 512 * 8);
        assert_eq!(layout.buffer_total_floats, 16 + 512 * 8 + 32 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 20);

        assert_eq!(layout.volume_data_offset, HEADER_FLOATS);
        assert_eq!(layout.event_data_offset, layout.volume_data_offset + layout.volume_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
    }

    #[test]
    fn header_carries_counts_and_status() {
        let layout = ProtocolLayout::new(4, 2);
        let mut header = [0.0; HEADER_FLOATS];
        let status = GameStatus {
            level: 3,
            score: 450,
            lives: 2,
            game_over: false,
        };
        layout.write_header(&mut header, 99, 10, 1, status, 1.5);

        assert_eq!(header[HEADER_FRAME_COUNTER], 99.0);
        assert_eq!(header[HEADER_VOLUME_COUNT], 4.0);
        assert_eq!(header[HEADER_EVENT_COUNT], 1.0);
        assert_eq!(header[HEADER_LEVEL], 3.0);
        assert_eq!(header[HEADER_SCORE], 450.0);
        assert_eq!(header[HEADER_LIVES], 2.0);
        assert_eq!(header[HEADER_GAME_OVER], 0.0);
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_LOCK], 0.0);
    }
}
