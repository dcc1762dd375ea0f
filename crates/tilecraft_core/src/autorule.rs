//! Auto-tile rule data: pattern rules over an IntGrid neighborhood.
//!
//! Rules are owned by a [`LayerDef`](crate::LayerDef) in ordered
//! [`AutoRuleGroup`]s. The engine that evaluates them lives in
//! `tilecraft_autorule`.

use crate::Uid;
use serde::{Deserialize, Serialize};

/// Pattern sentinel: the cell must hold any non-zero value.
pub const ANYTHING_TILE_ID: i32 = 10000;

/// Pattern sentinel: the cell must be empty (zero).
pub const NOTHING_TILE_ID: i32 = -10000;

/// Pattern sizes the editor offers.
pub const RULE_SIZES: [u32; 4] = [1, 3, 5, 7];

/// A named, toggleable list of rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoRuleGroup {
    pub uid: Uid,
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub rules: Vec<AutoRule>,
}

impl AutoRuleGroup {
    pub fn new(uid: Uid, name: impl Into<String>) -> Self {
        Self {
            uid,
            name: name.into(),
            is_active: true,
            rules: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: AutoRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rule(&self, uid: Uid) -> Option<&AutoRule> {
        self.rules.iter().find(|r| r.uid == uid)
    }

    pub fn remove_rule(&mut self, uid: Uid) -> Option<AutoRule> {
        let index = self.rules.iter().position(|r| r.uid == uid)?;
        Some(self.rules.remove(index))
    }
}

/// A single auto-tile rule.
///
/// `pattern` is a row-major `size * size` matrix centered on the candidate
/// cell. Each entry is one of:
///
/// - `0`: don't care
/// - [`ANYTHING_TILE_ID`]: the cell must be non-zero
/// - [`NOTHING_TILE_ID`]: the cell must be zero
/// - `v > 0`: the cell must equal `v`
/// - `v < 0`: the cell must not equal `-v`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoRule {
    pub uid: Uid,
    /// Odd matrix dimension (1, 3, 5 or 7).
    pub size: u32,
    pub pattern: Vec<i32>,
    /// Probability in `0..=1` that a matching cell actually gets a tile.
    #[serde(default = "default_chance")]
    pub chance: f32,
    #[serde(default = "default_true")]
    pub break_on_match: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Candidate tiles. Only the first one is placed.
    #[serde(default)]
    pub tile_ids: Vec<u32>,
}

fn default_true() -> bool {
    true
}

fn default_chance() -> f32 {
    1.0
}

/// Pattern length for `size`, or `None` when `size` is not in [`RULE_SIZES`].
fn pattern_len(size: u32) -> Option<usize> {
    if RULE_SIZES.contains(&size) {
        Some((size * size) as usize)
    } else {
        None
    }
}

impl AutoRule {
    /// Create an active rule with an all-don't-care pattern
    pub fn new(uid: Uid, size: u32) -> Self {
        Self {
            uid,
            size,
            pattern: vec![0; pattern_len(size).unwrap_or(0)],
            chance: 1.0,
            break_on_match: true,
            is_active: true,
            tile_ids: Vec::new(),
        }
    }

    pub fn with_tile(mut self, tile_id: u32) -> Self {
        self.tile_ids.push(tile_id);
        self
    }

    pub fn with_chance(mut self, chance: f32) -> Self {
        self.chance = chance;
        self
    }

    pub fn with_pattern(mut self, pattern: Vec<i32>) -> Self {
        self.pattern = pattern;
        self
    }

    /// Half the pattern size, rounded down.
    pub fn radius(&self) -> u32 {
        self.size / 2
    }

    /// Set the pattern entry at offset `(px, py)` from the top-left corner.
    /// Returns `false` if the offset is outside the matrix.
    pub fn set_pattern_cell(&mut self, px: u32, py: u32, value: i32) -> bool {
        let Some(len) = pattern_len(self.size) else {
            return false;
        };
        if px >= self.size || py >= self.size {
            return false;
        }
        if self.pattern.len() != len {
            self.pattern = self.normalized_pattern();
        }
        self.pattern[(py * self.size + px) as usize] = value;
        true
    }

    /// Set the center entry of the pattern
    pub fn set_center(&mut self, value: i32) {
        let r = self.radius();
        self.set_pattern_cell(r, r, value);
    }

    /// Whether `size` is one of [`RULE_SIZES`]. Rules loaded with any other
    /// size never match.
    pub fn has_valid_size(&self) -> bool {
        pattern_len(self.size).is_some()
    }

    /// The pattern padded with don't-care or truncated to `size * size`.
    /// Empty when the size is invalid.
    pub fn normalized_pattern(&self) -> Vec<i32> {
        let len = pattern_len(self.size).unwrap_or(0);
        let mut pattern = self.pattern.clone();
        pattern.resize(len, 0);
        pattern
    }

    /// Whether the rule can ever place a tile
    pub fn is_complete(&self) -> bool {
        self.has_valid_size() && !self.tile_ids.is_empty() && self.chance > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_rule_lookup_and_removal() {
        let mut group = AutoRuleGroup::new(1, "Walls")
            .with_rule(AutoRule::new(2, 1))
            .with_rule(AutoRule::new(3, 3));

        assert_eq!(group.rule(3).map(|r| r.size), Some(3));
        assert_eq!(group.remove_rule(2).map(|r| r.uid), Some(2));
        assert!(group.remove_rule(2).is_none());
        assert!(group.rule(2).is_none());
        assert_eq!(group.rules.len(), 1);
    }

    #[test]
    fn test_new_rule_is_dont_care() {
        let rule = AutoRule::new(1, 3);
        assert_eq!(rule.pattern, vec![0; 9]);
        assert_eq!(rule.radius(), 1);
        assert!(!rule.is_complete());
        assert!(rule.with_tile(4).is_complete());
    }

    #[test]
    fn test_normalized_pattern_pads_and_truncates() {
        let short = AutoRule::new(1, 3).with_pattern(vec![5, 5]);
        assert_eq!(short.normalized_pattern(), vec![5, 5, 0, 0, 0, 0, 0, 0, 0]);

        let long = AutoRule::new(1, 1).with_pattern(vec![2, 3, 4]);
        assert_eq!(long.normalized_pattern(), vec![2]);
    }

    #[test]
    fn test_set_pattern_cell_repairs_length() {
        let mut rule = AutoRule::new(1, 3).with_pattern(Vec::new());
        rule.set_center(5);
        assert_eq!(rule.pattern.len(), 9);
        assert_eq!(rule.pattern[4], 5);
        assert!(!rule.set_pattern_cell(3, 0, 1));
    }

    #[test]
    fn test_invalid_sizes_are_never_complete() {
        for size in [0, 2, 9, 65536, u32::MAX] {
            let mut rule = AutoRule::new(1, 1).with_tile(4);
            rule.size = size;
            assert!(!rule.has_valid_size(), "size {size}");
            assert!(!rule.is_complete(), "size {size}");
            assert!(rule.normalized_pattern().is_empty(), "size {size}");
            assert!(!rule.set_pattern_cell(0, 0, 1), "size {size}");
        }
        assert!(AutoRule::new(1, 65536).pattern.is_empty());
    }

    #[test]
    fn test_rule_json_defaults() {
        let json = r#"{ "Uid": 3, "Size": 1, "Pattern": [1], "TileIds": [9] }"#;
        let rule: AutoRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.chance, 1.0);
        assert!(rule.is_active);
        assert!(rule.break_on_match);
    }
}
