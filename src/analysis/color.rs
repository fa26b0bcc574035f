//! Stable ring colors.

/// Colors handed out to rings.
pub const RING_PALETTE: [&str; 8] = [
	"#8b5cf6", "#f59e0b", "#10b981", "#ec4899", "#06b6d4", "#eab308", "#22c55e", "#f97316",
];

/// Color for accounts outside any ring. Not part of [`RING_PALETTE`].
pub const DEFAULT_RING_COLOR: &str = "#3b82f6";

/// Picks the palette entry for a ring.
///
/// The index is the sum of the id's UTF-16 code units modulo the palette
/// size, so the same id gets the same color on every run. Different rings can
/// share a color.
pub fn ring_color(ring_id: Option<&str>) -> &'static str {
	match ring_id {
		Some(id) if !id.is_empty() => {
			let sum: u64 = id.encode_utf16().map(u64::from).sum();
			RING_PALETTE[(sum % RING_PALETTE.len() as u64) as usize]
		}
		_ => DEFAULT_RING_COLOR,
	}
}
