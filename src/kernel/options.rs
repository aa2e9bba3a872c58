use serde::{Deserialize, Serialize};

/// Parameters of a full segmentation run.
///
/// - `ratio`: weight of the feature channels against the spatial axes. Features
///   are multiplied by it before any distance is computed.
/// - `kernel_size`: Gaussian bandwidth of the density estimate (>= 1). The
///   search window radius is `floor(3 * kernel_size)`.
/// - `max_dist`: links longer than this are cut; larger values give fewer,
///   larger segments.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickshiftParams {
    pub ratio: f64,
    pub kernel_size: f64,
    pub max_dist: f64,
    /// Also return the truncated parent forest and link distances.
    pub return_tree: bool,
    /// Spatial Gaussian pre-smoothing; 0 disables it.
    pub sigma: f64,
    /// Convert 3-channel sRGB input in [0, 1] to CIE-Lab first.
    pub convert2lab: bool,
    /// Fixed seed for the tie-breaking noise. `None` seeds from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
}

impl Default for QuickshiftParams {
    fn default() -> Self {
        Self {
            ratio: 1.0,
            kernel_size: 5.0,
            max_dist: 10.0,
            return_tree: false,
            sigma: 0.0,
            convert2lab: true,
            random_seed: None,
        }
    }
}

impl QuickshiftParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_tree(mut self, return_tree: bool) -> Self {
        self.return_tree = return_tree;
        self
    }
}
