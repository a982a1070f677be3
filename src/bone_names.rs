use serde::{Deserialize, Serialize};

/// Tokens that mark a bone as belonging to one side of the body.
///
/// Matching is case-sensitive substring matching, so the markers must follow
/// the naming convention of the rig exactly (`LeftArm`, `RightUpLeg`, ...).
/// The mapper never checks that the counterpart it produces is a real bone;
/// that is the mirror engine's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideMarkers {
    pub left: String,
    pub right: String,
}

impl Default for SideMarkers {
    fn default() -> Self {
        Self {
            left: "Left".to_owned(),
            right: "Right".to_owned(),
        }
    }
}

impl SideMarkers {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Returns true if the name carries either side marker
    pub fn is_lateral(&self, name: &str) -> bool {
        self.usable() && (name.contains(&self.left) || name.contains(&self.right))
    }

    /// Name of the bone on the opposite side of the body.
    ///
    /// Every marker occurrence is swapped in one left-to-right pass, which keeps
    /// the mapping self-inverse even for names carrying both markers. Central
    /// bones (spine, head, hips) come back unchanged.
    pub fn counterpart_of(&self, name: &str) -> String {
        if !self.usable() {
            return name.to_owned();
        }

        let mut out = String::with_capacity(name.len() + 1);
        let mut rest = name;
        while !rest.is_empty() {
            if let Some(tail) = rest.strip_prefix(self.left.as_str()) {
                out.push_str(&self.right);
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix(self.right.as_str()) {
                out.push_str(&self.left);
                rest = tail;
            } else {
                let mut chars = rest.chars();
                if let Some(ch) = chars.next() {
                    out.push(ch);
                }
                rest = chars.as_str();
            }
        }
        out
    }

    // Empty or identical markers would make every name lateral.
    fn usable(&self) -> bool {
        !self.left.is_empty() && !self.right.is_empty() && self.left != self.right
    }
}
