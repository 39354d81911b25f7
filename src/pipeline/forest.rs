//! Random forest classifier with impurity-based feature importances
//!
//! Binary classification trees grown with Gini impurity. Each tree owns a
//! ChaCha RNG seeded from the forest seed and its index, so a given
//! [`ForestConfig`] always produces the same forest regardless of how the trees
//! are scheduled across threads.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::{AnalysisError, Result};

/// Forest hyperparameters and seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Maximum depth of each tree (the root is depth 0)
    pub max_depth: usize,
    /// Minimum samples a node needs before it may split
    pub min_samples_split: usize,
    /// Minimum samples on each side of a split
    pub min_samples_leaf: usize,
    /// Candidate features per split (floor of sqrt of the feature count if None)
    pub max_features: Option<usize>,
    /// Fit each tree on a bootstrap sample
    pub bootstrap: bool,
    /// Random seed
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
enum TreeNode {
    Leaf {
        /// Fraction of positive samples that reached this leaf
        probability: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// A single classification tree
#[derive(Debug, Clone)]
struct DecisionTree {
    root: TreeNode,
    importances: Vec<f64>,
}

/// Parameters shared by every node of one tree
struct GrowParams {
    max_depth: usize,
    min_samples_split: usize,
    min_samples_leaf: usize,
    max_features: usize,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// Gini impurity for a binary node: 2p(1 - p)
fn gini_impurity(positives: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    let p = positives / total;
    2.0 * p * (1.0 - p)
}

impl DecisionTree {
    /// Grow a tree on `indices` (which may repeat rows, as bootstrap samples do).
    fn grow(
        features: &[Vec<f64>],
        labels: &[bool],
        indices: &[usize],
        params: &GrowParams,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let n_features = features.first().map_or(0, |row| row.len());
        let mut importances = vec![0.0; n_features];
        let mut indices = indices.to_vec();
        let root = Self::build_node(
            features,
            labels,
            &mut indices,
            0,
            params,
            rng,
            &mut importances,
        );

        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            for imp in &mut importances {
                *imp /= total;
            }
        }

        Self { root, importances }
    }

    fn build_node(
        features: &[Vec<f64>],
        labels: &[bool],
        indices: &mut [usize],
        depth: usize,
        params: &GrowParams,
        rng: &mut ChaCha8Rng,
        importances: &mut [f64],
    ) -> TreeNode {
        let n = indices.len() as f64;
        let positives = indices.iter().filter(|&&i| labels[i]).count() as f64;
        let impurity = gini_impurity(positives, n);

        if depth >= params.max_depth || indices.len() < params.min_samples_split || impurity <= 0.0
        {
            return TreeNode::Leaf {
                probability: if n > 0.0 { positives / n } else { 0.0 },
            };
        }

        let Some(best) = Self::find_best_split(features, labels, indices, impurity, params, rng)
        else {
            return TreeNode::Leaf {
                probability: positives / n,
            };
        };

        // Weighted impurity decrease; normalized per tree later
        importances[best.feature] += n * best.gain;

        // Partition in place: left side holds values <= threshold
        let mut split_at = 0;
        for i in 0..indices.len() {
            if features[indices[i]][best.feature] <= best.threshold {
                indices.swap(i, split_at);
                split_at += 1;
            }
        }
        let (left_idx, right_idx) = indices.split_at_mut(split_at);

        let left = Self::build_node(
            features,
            labels,
            left_idx,
            depth + 1,
            params,
            rng,
            importances,
        );
        let right = Self::build_node(
            features,
            labels,
            right_idx,
            depth + 1,
            params,
            rng,
            importances,
        );

        TreeNode::Split {
            feature: best.feature,
            threshold: best.threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Find the split with the largest Gini reduction.
    ///
    /// Candidate features are drawn in random order; constant features do not count
    /// towards `max_features`, so drawing continues until enough informative
    /// features were examined or all were tried.
    fn find_best_split(
        features: &[Vec<f64>],
        labels: &[bool],
        indices: &[usize],
        parent_impurity: f64,
        params: &GrowParams,
        rng: &mut ChaCha8Rng,
    ) -> Option<BestSplit> {
        let n_features = features[indices[0]].len();
        let mut order: Vec<usize> = (0..n_features).collect();
        order.shuffle(rng);

        let n = indices.len();
        let total_pos = indices.iter().filter(|&&i| labels[i]).count() as f64;

        let mut best: Option<BestSplit> = None;
        let mut visited = 0;
        let mut pairs: Vec<(f64, bool)> = Vec::with_capacity(n);

        for feature in order {
            if visited >= params.max_features {
                break;
            }

            pairs.clear();
            pairs.extend(indices.iter().map(|&i| (features[i][feature], labels[i])));
            pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

            if pairs[0].0 == pairs[n - 1].0 {
                continue;
            }
            visited += 1;

            // Sweep split points with running counts on the left side
            let mut left_pos = 0.0;
            for i in 0..n - 1 {
                if pairs[i].1 {
                    left_pos += 1.0;
                }

                let left_count = i + 1;
                let right_count = n - left_count;
                if left_count < params.min_samples_leaf || right_count < params.min_samples_leaf {
                    continue;
                }

                // Never split between equal values
                if pairs[i].0 == pairs[i + 1].0 {
                    continue;
                }

                let left_n = left_count as f64;
                let right_n = right_count as f64;
                let weighted = (left_n * gini_impurity(left_pos, left_n)
                    + right_n * gini_impurity(total_pos - left_pos, right_n))
                    / n as f64;
                let gain = parent_impurity - weighted;

                if gain > best.as_ref().map_or(0.0, |b| b.gain) {
                    best = Some(BestSplit {
                        feature,
                        threshold: (pairs[i].0 + pairs[i + 1].0) / 2.0,
                        gain,
                    });
                }
            }
        }

        best
    }

    /// Probability of the positive class for one row
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { probability } => return *probability,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        &**left
                    } else {
                        &**right
                    };
                }
            }
        }
    }

    /// Normalized importances of this tree (all zero for a single-leaf tree)
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }
}

/// Random forest classifier
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    feature_importances: Vec<f64>,
}

impl RandomForest {
    /// Fit a forest on row-major `features` and boolean `labels`.
    pub fn fit(config: ForestConfig, features: &[Vec<f64>], labels: &[bool]) -> Result<Self> {
        let n_samples = features.len();
        if config.n_trees == 0 {
            return Err(AnalysisError::InsufficientData(
                "a forest needs at least one tree".to_string(),
            ));
        }
        if n_samples == 0 || n_samples != labels.len() {
            return Err(AnalysisError::InsufficientData(format!(
                "{} feature row(s) for {} label(s)",
                n_samples,
                labels.len()
            )));
        }
        let n_features = features[0].len();
        if n_features == 0 || features.iter().any(|row| row.len() != n_features) {
            return Err(AnalysisError::DataFormat(
                "feature matrix rows must share a non-zero width".to_string(),
            ));
        }

        let params = GrowParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split.max(2),
            min_samples_leaf: config.min_samples_leaf.max(1),
            max_features: config
                .max_features
                .unwrap_or_else(|| (n_features as f64).sqrt() as usize)
                .clamp(1, n_features),
        };

        let trees: Vec<DecisionTree> = (0..config.n_trees)
            .into_par_iter()
            .map(|i| {
                let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(i as u64));
                let indices: Vec<usize> = if config.bootstrap {
                    (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
                } else {
                    (0..n_samples).collect()
                };
                DecisionTree::grow(features, labels, &indices, &params, &mut rng)
            })
            .collect();

        // Aggregate in tree order so the floating point sums are reproducible
        let mut feature_importances = vec![0.0; n_features];
        for tree in &trees {
            for (acc, &imp) in feature_importances.iter_mut().zip(tree.feature_importances()) {
                *acc += imp;
            }
        }
        let total: f64 = feature_importances.iter().sum();
        if total > 0.0 {
            for imp in &mut feature_importances {
                *imp /= total;
            }
        }

        Ok(Self {
            trees,
            feature_importances,
        })
    }

    /// Normalized impurity-based importances, one per input column
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    /// Mean positive-class probability across trees
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.5;
        }
        self.trees.iter().map(|t| t.predict_proba(row)).sum::<f64>() / self.trees.len() as f64
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}
