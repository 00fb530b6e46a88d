use super::LayerGraph;

/// Weighted mean order of a node's neighbors. Both fields are `None` for a node without any.
#[derive(Debug, Clone, PartialEq)]
pub struct BarycenterEntry {
    pub v: String,
    pub barycenter: Option<f64>,
    pub weight: Option<f64>,
}

pub fn barycenter(g: &LayerGraph, movable: &[String]) -> Vec<BarycenterEntry> {
    movable
        .iter()
        .map(|v| {
            let mut sum = 0.0;
            let mut weight = 0.0;
            let mut any = false;
            g.for_each_in_edge(v, |key, edge| {
                let order = g.node(&key.v).and_then(|n| n.order).unwrap_or(0);
                sum += edge.weight * order as f64;
                weight += edge.weight;
                any = true;
            });
            BarycenterEntry {
                v: v.clone(),
                barycenter: any.then(|| sum / weight),
                weight: any.then_some(weight),
            }
        })
        .collect()
}
