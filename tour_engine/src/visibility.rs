use tour_content::HotspotModel;

/// Filter a hotspot list down to the ones visible at the given playback
/// clock. Time windows are inclusive on both bounds; `Always` and
/// `SceneLocal` hotspots pass unconditionally (the caller only hands over
/// the displayed layer's or scene's own list). Pure and O(n) — this runs
/// on every clock tick.
pub fn visible_hotspots(hotspots: &[HotspotModel], clock: f64) -> Vec<&HotspotModel> {
    hotspots
        .iter()
        .filter(|hotspot| hotspot.visibility.matches_clock(clock))
        .collect()
}
