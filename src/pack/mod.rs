//! Hierarchical circle packing.
//!
//! Same procedure as d3-hierarchy's `pack()`: leaves get `r = sqrt(value)`,
//! every sibling group is packed with the front-chain algorithm and wrapped in
//! its minimal enclosing circle, a second pass repeats that with padding
//! scaled into layout units, and a final pass scales the whole tree so the
//! root fills the canvas.

mod enclose;
mod siblings;

use std::sync::Arc;

use tracing::debug;

use crate::data::CountryRecord;
use crate::hierarchy::HierarchyNode;

use self::siblings::pack_siblings;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Circle {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) r: f64,
}

/// Linear congruential generator matching d3's, so layouts are reproducible.
pub(crate) struct Lcg {
    state: u64,
}

impl Lcg {
    const A: u64 = 1_664_525;
    const C: u64 = 1_013_904_223;
    const M: u64 = 1 << 32;

    pub(crate) fn new() -> Self {
        Self { state: 1 }
    }

    pub(crate) fn next_f64(&mut self) -> f64 {
        self.state = (Self::A * self.state + Self::C) % Self::M;
        self.state as f64 / Self::M as f64
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackOptions {
    pub size: f64,
    pub padding: f64,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            size: 932.0,
            padding: 3.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutCircle {
    pub name: String,
    pub depth: usize,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    /// Aggregate value: own value for leaves, sum of descendants otherwise.
    pub value: f64,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub country: Option<Arc<CountryRecord>>,
}

impl LayoutCircle {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Every node of the packed tree in pre-order: a parent always comes before
/// its children, so drawing in order puts children on top.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackLayout {
    pub circles: Vec<LayoutCircle>,
}

impl PackLayout {
    pub fn root(&self) -> Option<&LayoutCircle> {
        self.circles.first()
    }

    pub fn find(&self, name: &str) -> Option<&LayoutCircle> {
        self.circles.iter().find(|circle| circle.name == name)
    }

    pub fn children_of(&self, index: usize) -> impl Iterator<Item = &LayoutCircle> {
        self.circles
            .get(index)
            .into_iter()
            .flat_map(|circle| circle.children.iter())
            .filter_map(|&child| self.circles.get(child))
    }

    pub fn leaves(&self) -> impl Iterator<Item = &LayoutCircle> {
        self.circles.iter().filter(|circle| circle.is_leaf())
    }

    pub fn max_depth(&self) -> usize {
        self.circles
            .iter()
            .map(|circle| circle.depth)
            .max()
            .unwrap_or(0)
    }
}

pub fn pack(root: &HierarchyNode, options: PackOptions) -> PackLayout {
    let mut nodes = Vec::new();
    flatten(root, None, 0, &mut nodes);

    // Pre-order means reverse iteration visits children before parents.
    for index in (0..nodes.len()).rev() {
        if !nodes[index].children.is_empty() {
            let sum = nodes[index]
                .children
                .iter()
                .map(|&child| nodes[child].value)
                .sum();
            nodes[index].value = sum;
        }
    }
    sort_children(&mut nodes);

    let size = options.size.max(0.0);
    let center = size / 2.0;
    let mut circles = nodes
        .iter()
        .map(|node| Circle {
            x: 0.0,
            y: 0.0,
            r: if node.children.is_empty() {
                node.value.sqrt()
            } else {
                0.0
            },
        })
        .collect::<Vec<_>>();

    let mut random = Lcg::new();
    pack_all(&nodes, &mut circles, 0.0, &mut random);

    let root_r = circles[0].r;
    if root_r > 0.0 && size > 0.0 {
        pack_all(&nodes, &mut circles, options.padding * root_r / size, &mut random);
    }

    let root_r = circles[0].r;
    let scale = if root_r > 0.0 { size / (2.0 * root_r) } else { 0.0 };
    circles[0].x = center;
    circles[0].y = center;
    circles[0].r *= scale;
    for index in 1..nodes.len() {
        let parent = nodes[index].parent.unwrap_or(0);
        let anchor = circles[parent];
        let circle = &mut circles[index];
        circle.r *= scale;
        circle.x = anchor.x + scale * circle.x;
        circle.y = anchor.y + scale * circle.y;
    }

    debug!(
        nodes = nodes.len(),
        root_value = nodes[0].value,
        "packed hierarchy"
    );

    PackLayout {
        circles: nodes
            .into_iter()
            .zip(circles)
            .map(|(node, circle)| LayoutCircle {
                name: node.name,
                depth: node.depth,
                x: circle.x,
                y: circle.y,
                r: circle.r,
                value: node.value,
                parent: node.parent,
                children: node.children,
                country: node.country,
            })
            .collect(),
    }
}

struct PackNode {
    name: String,
    depth: usize,
    value: f64,
    parent: Option<usize>,
    children: Vec<usize>,
    country: Option<Arc<CountryRecord>>,
}

fn flatten(
    node: &HierarchyNode,
    parent: Option<usize>,
    depth: usize,
    nodes: &mut Vec<PackNode>,
) -> usize {
    let index = nodes.len();
    nodes.push(PackNode {
        name: node.name.clone(),
        depth,
        value: node.value.filter(|value| value.is_finite() && *value > 0.0).unwrap_or(0.0),
        parent,
        children: Vec::with_capacity(node.children.len()),
        country: node.country.clone(),
    });

    for child in &node.children {
        let child_index = flatten(child, Some(index), depth + 1, nodes);
        nodes[index].children.push(child_index);
    }
    index
}

/// Descending aggregate value; the sort is stable so ties keep input order.
/// Indices stay put, only each child list is reordered, so pre-order
/// (parent before child) still holds for the arena.
fn sort_children(nodes: &mut [PackNode]) {
    for index in 0..nodes.len() {
        let mut children = std::mem::take(&mut nodes[index].children);
        children.sort_by(|&a, &b| nodes[b].value.total_cmp(&nodes[a].value));
        nodes[index].children = children;
    }
}

/// One post-order packing pass. Children are packed relative to their
/// parent's center; zero-value children stay degenerate at that center.
fn pack_all(nodes: &[PackNode], circles: &mut [Circle], padding: f64, random: &mut Lcg) {
    for index in (0..nodes.len()).rev() {
        let children = &nodes[index].children;
        if children.is_empty() {
            continue;
        }

        let packable = children
            .iter()
            .copied()
            .filter(|&child| nodes[child].value > 0.0)
            .collect::<Vec<_>>();

        for &child in children {
            if nodes[child].value <= 0.0 {
                circles[child] = Circle::default();
            }
        }

        if packable.is_empty() {
            circles[index].r = 0.0;
            continue;
        }

        let mut group = packable
            .iter()
            .map(|&child| Circle {
                r: circles[child].r + padding,
                ..circles[child]
            })
            .collect::<Vec<_>>();
        let enclosing = pack_siblings(&mut group, random);

        for (&child, placed) in packable.iter().zip(&group) {
            circles[child].x = placed.x;
            circles[child].y = placed.y;
        }
        circles[index].r = enclosing + padding;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: &LayoutCircle, b: &LayoutCircle) -> f64 {
        ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
    }

    fn sample() -> HierarchyNode {
        HierarchyNode::branch(
            "Europe",
            vec![
                HierarchyNode::branch(
                    "West",
                    vec![
                        HierarchyNode::leaf("France", 67.0),
                        HierarchyNode::leaf("Belgium", 11.5),
                        HierarchyNode::leaf("Netherlands", 17.5),
                        HierarchyNode::leaf("Luxembourg", 0.6),
                    ],
                ),
                HierarchyNode::branch(
                    "East",
                    vec![
                        HierarchyNode::leaf("Poland", 38.0),
                        HierarchyNode::leaf("Czechia", 10.5),
                        HierarchyNode::leaf("Slovakia", 5.4),
                    ],
                ),
                HierarchyNode::branch(
                    "North",
                    vec![
                        HierarchyNode::leaf("Sweden", 10.4),
                        HierarchyNode::leaf("Iceland", 0.38),
                        HierarchyNode::leaf("Atlantis", 0.0),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn root_fills_the_canvas() {
        let layout = pack(&sample(), PackOptions::default());
        let root = layout.root().expect("root");
        assert_eq!((root.x, root.y), (466.0, 466.0));
        assert!((root.r - 466.0).abs() < 1e-6);
        assert_eq!(root.depth, 0);
        assert!((root.value - 161.28).abs() < 1e-9);
    }

    #[test]
    fn children_nest_inside_parents_without_overlap() {
        let options = PackOptions::default();
        let layout = pack(&sample(), options);

        for (index, parent) in layout.circles.iter().enumerate() {
            assert!(parent.r >= 0.0);
            let children = layout.children_of(index).collect::<Vec<_>>();
            for (position, child) in children.iter().enumerate() {
                assert_eq!(child.depth, parent.depth + 1);
                if child.r > 0.0 {
                    assert!(
                        distance(parent, child) + child.r <= parent.r + 1e-6,
                        "{} escapes {}",
                        child.name,
                        parent.name
                    );
                }
                for other in &children[position + 1..] {
                    if child.r > 0.0 && other.r > 0.0 {
                        assert!(
                            distance(child, other) >= child.r + other.r - 1e-6,
                            "{} overlaps {}",
                            child.name,
                            other.name
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn padding_separates_rims_and_siblings() {
        let options = PackOptions::default();
        let layout = pack(&sample(), options);
        // padding is scaled by the unpadded root radius, so gaps land a bit under P
        let floor = options.padding * 0.8;

        for (index, parent) in layout.circles.iter().enumerate() {
            let children = layout
                .children_of(index)
                .filter(|child| child.r > 0.0)
                .collect::<Vec<_>>();
            if children.is_empty() {
                continue;
            }

            let rim_gaps = children
                .iter()
                .map(|child| parent.r - distance(parent, child) - child.r)
                .collect::<Vec<_>>();
            for (child, gap) in children.iter().zip(&rim_gaps) {
                assert!(*gap >= floor, "{} is {gap} from the rim of {}", child.name, parent.name);
            }
            let tightest = rim_gaps.iter().copied().fold(f64::INFINITY, f64::min);
            assert!(tightest <= options.padding + 1e-6, "{} is loose: {tightest}", parent.name);

            for (position, child) in children.iter().enumerate() {
                for other in &children[position + 1..] {
                    let gap = distance(child, other) - child.r - other.r;
                    assert!(gap >= floor, "{} and {} are {gap} apart", child.name, other.name);
                }
            }
        }
    }

    #[test]
    fn siblings_sorted_and_sized_by_value() {
        let layout = pack(&sample(), PackOptions::default());
        let west = layout
            .circles
            .iter()
            .position(|circle| circle.name == "West")
            .expect("west");
        let names = layout
            .children_of(west)
            .map(|circle| circle.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["France", "Netherlands", "Belgium", "Luxembourg"]);

        let leaves = layout.leaves().collect::<Vec<_>>();
        for a in &leaves {
            for b in &leaves {
                if a.value > b.value {
                    assert!(a.r >= b.r, "{} smaller than {}", a.name, b.name);
                }
            }
        }
    }

    #[test]
    fn zero_value_leaf_sits_at_parent_center() {
        let layout = pack(&sample(), PackOptions::default());
        let north = layout.find("North").expect("north");
        let atlantis = layout.find("Atlantis").expect("atlantis");
        assert_eq!(atlantis.r, 0.0);
        assert_eq!(atlantis.value, 0.0);
        assert!((atlantis.x - north.x).abs() < 1e-9);
        assert!((atlantis.y - north.y).abs() < 1e-9);
        assert!(layout.find("Iceland").expect("iceland").r > 0.0);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let root = HierarchyNode::branch(
            "root",
            vec![
                HierarchyNode::leaf("first", 4.0),
                HierarchyNode::leaf("second", 4.0),
                HierarchyNode::leaf("third", 9.0),
            ],
        );
        let layout = pack(&root, PackOptions::default());
        let names = layout
            .children_of(0)
            .map(|circle| circle.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["third", "first", "second"]);
    }

    #[test]
    fn all_zero_tree_degenerates_without_panicking() {
        let root = HierarchyNode::branch(
            "Europe",
            vec![HierarchyNode::branch("Empty", vec![HierarchyNode::leaf("Nowhere", 0.0)])],
        );
        let layout = pack(&root, PackOptions::default());
        assert_eq!(layout.circles.len(), 3);
        for circle in &layout.circles {
            assert_eq!(circle.r, 0.0);
            assert_eq!((circle.x, circle.y), (466.0, 466.0));
        }
    }

    #[test]
    fn single_leaf_fills_root_minus_padding() {
        let root = HierarchyNode::branch("root", vec![HierarchyNode::leaf("only", 25.0)]);
        let layout = pack(&root, PackOptions { size: 100.0, padding: 5.0 });
        let only = layout.find("only").expect("leaf");
        assert!((only.x - 50.0).abs() < 1e-9);
        assert!(only.r < 50.0);
        assert!((50.0 - only.r - 5.0).abs() < 1.0);
    }

    #[test]
    fn lcg_matches_reference_sequence() {
        let mut random = Lcg::new();
        let first = random.next_f64();
        assert!((first - (1_015_568_748.0 / 4_294_967_296.0)).abs() < 1e-15);
        assert!(random.next_f64() < 1.0);
    }
}
