use std::sync::Arc;

use crate::data::{CountryRecord, Dataset, Metric};

/// Tree handed to the pack layout: root, one node per region, one leaf per
/// country. Only leaves carry a value; aggregates are computed by the layout.
#[derive(Clone, Debug, PartialEq)]
pub struct HierarchyNode {
    pub name: String,
    pub value: Option<f64>,
    pub children: Vec<HierarchyNode>,
    pub country: Option<Arc<CountryRecord>>,
}

impl HierarchyNode {
    pub fn branch(name: impl Into<String>, children: Vec<HierarchyNode>) -> Self {
        Self {
            name: name.into(),
            value: None,
            children,
            country: None,
        }
    }

    pub fn leaf(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            children: Vec::new(),
            country: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn leaves(&self) -> Vec<&HierarchyNode> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                leaves.push(node);
            } else {
                stack.extend(node.children.iter().rev());
            }
        }
        leaves
    }
}

pub fn build_hierarchy(dataset: &Dataset, metric: Metric) -> HierarchyNode {
    let regions = dataset
        .regions()
        .iter()
        .map(|region| {
            let countries = region
                .countries
                .iter()
                .map(|country| HierarchyNode {
                    name: country.name.clone(),
                    value: Some(metric.value_of(country)),
                    children: Vec::new(),
                    country: Some(Arc::clone(country)),
                })
                .collect();
            HierarchyNode::branch(region.name.clone(), countries)
        })
        .collect();

    HierarchyNode::branch(dataset.name(), regions)
}
