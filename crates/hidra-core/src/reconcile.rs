// ── Wi-Fi network reconciliation ──
//
// Merges the networks the radio can see with the ones stored on the
// gateway into a single picker list keyed by SSID.

use indexmap::IndexMap;

use hidra_api::models::{NearNetwork, SavedNetwork};

use crate::model::NetworkEntry;

/// Merge visible and saved networks.
///
/// SSIDs keep first-seen order (visible first, then saved) before the
/// stable sort by descending signal, so ties keep that order. Saved
/// networks that are not visible sort last with `f64::NEG_INFINITY`.
pub fn merge_networks(visible: &[NearNetwork], saved: &[SavedNetwork]) -> Vec<NetworkEntry> {
    let mut signals: IndexMap<&str, f64> = IndexMap::new();
    for near in visible {
        // Strongest reading wins if the radio reports an SSID twice.
        let slot = signals.entry(near.ssid.as_str()).or_insert(near.rssi);
        if near.rssi > *slot {
            *slot = near.rssi;
        }
    }
    for stored in saved {
        signals
            .entry(stored.ssid.as_str())
            .or_insert(f64::NEG_INFINITY);
    }

    let mut merged: Vec<NetworkEntry> = signals
        .into_iter()
        .zip(0u32..)
        .map(|((ssid, signal), id)| {
            let stored = saved.iter().find(|s| s.ssid == ssid);
            NetworkEntry {
                id,
                ssid: ssid.to_owned(),
                signal,
                is_saved: stored.is_some(),
                stored_password: stored.and_then(|s| s.pass.clone()),
                saved_id: stored.map(|s| s.id),
            }
        })
        .collect();

    merged.sort_by(|a, b| b.signal.total_cmp(&a.signal));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn near(ssid: &str, rssi: f64) -> NearNetwork {
        NearNetwork {
            id: 0,
            ssid: ssid.into(),
            rssi,
        }
    }

    fn stored(id: u32, ssid: &str, pass: &str) -> SavedNetwork {
        SavedNetwork {
            id,
            ssid: ssid.into(),
            pass: Some(pass.into()),
        }
    }

    #[test]
    fn union_sorted_by_signal() {
        let merged = merge_networks(
            &[near("A", -50.0), near("B", -80.0)],
            &[stored(0, "B", "x"), stored(1, "C", "y")],
        );

        let view: Vec<_> = merged
            .iter()
            .map(|n| (n.ssid.as_str(), n.signal, n.is_saved))
            .collect();
        assert_eq!(
            view,
            vec![
                ("A", -50.0, false),
                ("B", -80.0, true),
                ("C", f64::NEG_INFINITY, true),
            ]
        );
        assert_eq!(merged[1].stored_password.as_deref(), Some("x"));
        assert_eq!(merged[2].saved_id, Some(1));
    }

    #[test]
    fn ids_follow_first_seen_order() {
        let merged = merge_networks(&[near("fraca", -90.0), near("forte", -30.0)], &[]);
        assert_eq!(merged[0].ssid, "forte");
        assert_eq!(merged[0].id, 1);
        assert_eq!(merged[1].id, 0);
    }

    #[test]
    fn equal_signals_keep_insertion_order() {
        let merged = merge_networks(
            &[],
            &[stored(0, "rede 1", "a"), stored(1, "rede 2", "b")],
        );
        let ssids: Vec<_> = merged.iter().map(|n| n.ssid.as_str()).collect();
        assert_eq!(ssids, vec!["rede 1", "rede 2"]);
    }

    #[test]
    fn repeated_ssid_keeps_strongest_reading() {
        let merged = merge_networks(&[near("A", -70.0), near("A", -40.0), near("A", -60.0)], &[]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].signal, -40.0);
    }

    #[test]
    fn empty_inputs_yield_empty_list() {
        assert!(merge_networks(&[], &[]).is_empty());
    }
}
