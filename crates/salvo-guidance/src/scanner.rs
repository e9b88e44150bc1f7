//! Target scanner. Flattens every sensor group into this tick's target list.

use salvo_core::components::{SensorGroup, TargetRecord};

/// Replace `targets` with the usable targets of every sensor group, in group
/// order then index order. Returns the number of records dropped.
///
/// Duplicates across groups are kept; the sensor subsystem owns deduplication.
pub fn scan_targets(groups: &[SensorGroup], targets: &mut Vec<TargetRecord>) -> usize {
    targets.clear();
    let mut dropped = 0;
    for group in groups {
        for target in &group.targets {
            if target.is_usable() {
                targets.push(target.clone());
            } else {
                dropped += 1;
            }
        }
    }
    if dropped > 0 {
        log::debug!("scanner dropped {dropped} unusable target record(s)");
    }
    dropped
}
