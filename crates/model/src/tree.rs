//! Variance-reduction regression tree used as the forest's base learner.

use ndarray::{ArrayView1, ArrayView2};

/// Arena node: either a leaf value or an axis-aligned split.
#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A fitted regression tree.
///
/// Splits minimize the summed squared error of the two children; leaves
/// predict the mean target of their training rows.
#[derive(Debug, Clone)]
pub(crate) struct RegressionTree {
    nodes: Vec<Node>,
    root: usize,
}

impl RegressionTree {
    /// Fit on the rows in `rows`, growing at most `max_depth` levels of
    /// splits. Squared-error reductions are accumulated per feature into
    /// `importances`.
    pub(crate) fn fit(
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        rows: &[usize],
        max_depth: usize,
        importances: &mut [f64],
    ) -> Self {
        let mut nodes = Vec::new();
        let root = grow(x, y, rows, max_depth, importances, &mut nodes);
        Self { nodes, root }
    }

    pub(crate) fn predict(&self, features: ArrayView1<'_, f64>) -> f64 {
        let mut idx = self.root;
        loop {
            match self.nodes[idx] {
                Node::Leaf { value } => return value,
                Node::Split { feature, threshold, left, right } => {
                    idx = if features[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

fn grow(
    x: ArrayView2<'_, f64>,
    y: ArrayView1<'_, f64>,
    rows: &[usize],
    depth_left: usize,
    importances: &mut [f64],
    nodes: &mut Vec<Node>,
) -> usize {
    let mean = rows.iter().map(|&r| y[r]).sum::<f64>() / rows.len() as f64;

    if depth_left == 0 || rows.len() < 2 {
        nodes.push(Node::Leaf { value: mean });
        return nodes.len() - 1;
    }

    let Some(split) = best_split(x, y, rows) else {
        nodes.push(Node::Leaf { value: mean });
        return nodes.len() - 1;
    };

    importances[split.feature] += split.reduction;

    let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
        rows.iter().partition(|&&r| x[[r, split.feature]] <= split.threshold);

    let left = grow(x, y, &left_rows, depth_left - 1, importances, nodes);
    let right = grow(x, y, &right_rows, depth_left - 1, importances, nodes);
    nodes.push(Node::Split { feature: split.feature, threshold: split.threshold, left, right });
    nodes.len() - 1
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    reduction: f64,
}

/// Exhaustive split search: for each feature, sort the rows by value and
/// scan candidate thresholds with prefix sums. Returns `None` when no
/// split reduces the summed squared error.
fn best_split(x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>, rows: &[usize]) -> Option<BestSplit> {
    let n = rows.len() as f64;
    let total: f64 = rows.iter().map(|&r| y[r]).sum();
    let total_sq: f64 = rows.iter().map(|&r| y[r] * y[r]).sum();
    let parent_sse = total_sq - total * total / n;

    let mut best: Option<BestSplit> = None;

    for feature in 0..x.ncols() {
        let mut pairs: Vec<(f64, f64)> = rows.iter().map(|&r| (x[[r, feature]], y[r])).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for i in 0..pairs.len() - 1 {
            left_sum += pairs[i].1;
            left_sq += pairs[i].1 * pairs[i].1;

            // Can only split between distinct feature values.
            if pairs[i].0 == pairs[i + 1].0 {
                continue;
            }

            let n_left = (i + 1) as f64;
            let n_right = n - n_left;
            let right_sum = total - left_sum;
            let right_sq = total_sq - left_sq;
            let sse = (left_sq - left_sum * left_sum / n_left)
                + (right_sq - right_sum * right_sum / n_right);
            let reduction = parent_sse - sse;

            if reduction > 1e-12
                && best.as_ref().is_none_or(|b| reduction > b.reduction)
            {
                best = Some(BestSplit {
                    feature,
                    threshold: (pairs[i].0 + pairs[i + 1].0) / 2.0,
                    reduction,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn single_row_is_a_leaf() {
        let x = array![[1.0, 2.0]];
        let y = array![3.5];
        let mut imp = vec![0.0; 2];
        let tree = RegressionTree::fit(x.view(), y.view(), &[0], 10, &mut imp);
        assert_relative_eq!(tree.predict(array![9.0, 9.0].view()), 3.5);
        assert!(imp.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn splits_a_step_function_exactly() {
        let x = array![[0.0, 1.0], [1.0, 1.0], [2.0, 1.0], [3.0, 1.0]];
        let y = array![0.0, 0.0, 10.0, 10.0];
        let rows: Vec<usize> = (0..4).collect();
        let mut imp = vec![0.0; 2];
        let tree = RegressionTree::fit(x.view(), y.view(), &rows, 10, &mut imp);
        assert_relative_eq!(tree.predict(array![0.5, 1.0].view()), 0.0);
        assert_relative_eq!(tree.predict(array![2.5, 1.0].view()), 10.0);
        // Only the informative feature earns importance.
        assert!(imp[0] > 0.0);
        assert_relative_eq!(imp[1], 0.0);
    }

    #[test]
    fn depth_zero_predicts_the_mean() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = array![1.0, 2.0, 3.0, 4.0];
        let rows: Vec<usize> = (0..4).collect();
        let mut imp = vec![0.0; 1];
        let tree = RegressionTree::fit(x.view(), y.view(), &rows, 0, &mut imp);
        assert_relative_eq!(tree.predict(array![0.0].view()), 2.5);
    }

    #[test]
    fn constant_target_never_splits() {
        let x = array![[0.0], [1.0], [2.0]];
        let y = array![7.0, 7.0, 7.0];
        let rows: Vec<usize> = (0..3).collect();
        let mut imp = vec![0.0; 1];
        let tree = RegressionTree::fit(x.view(), y.view(), &rows, 10, &mut imp);
        assert_relative_eq!(tree.predict(array![1.5].view()), 7.0);
        assert_relative_eq!(imp[0], 0.0);
    }
}
