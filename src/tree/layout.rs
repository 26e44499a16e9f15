use eframe::egui::{Vec2, vec2};

use crate::genealogy::{Member, MemberIndex};

use super::build::Pedigree;
use super::collapse::CollapseState;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub card_width: f32,
    pub card_height: f32,
    pub spouse_v_gap: f32,
    pub spouse_h_gap: f32,
    pub sibling_padding: f32,
    /// In baseline spacings.
    pub separation_padding: f32,
    pub toggle_radius: f32,
    pub toggle_stem: f32,
    pub level_gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width: 140.0,
            card_height: 70.0,
            spouse_v_gap: 40.0,
            spouse_h_gap: 20.0,
            sibling_padding: 60.0,
            separation_padding: 0.5,
            toggle_radius: 8.0,
            toggle_stem: 20.0,
            level_gap: 260.0,
        }
    }
}

impl LayoutConfig {
    pub fn node_spacing(&self) -> f32 {
        self.card_width + self.sibling_padding
    }

    pub fn spouse_row_y(&self) -> f32 {
        self.card_height + self.spouse_v_gap
    }

    pub fn bracket_y(&self) -> f32 {
        self.card_height / 2.0 + self.spouse_v_gap / 2.0
    }

    pub fn spouse_row_bottom(&self) -> f32 {
        self.spouse_row_y() + self.card_height / 2.0
    }

    pub fn toggle_slot(&self) -> f32 {
        self.toggle_radius * 2.0 + 8.0
    }

    pub fn spouse_row_width(&self, count: usize) -> f32 {
        if count == 0 {
            return 0.0;
        }
        count as f32 * self.card_width + (count - 1) as f32 * self.spouse_h_gap
    }

    pub fn spouse_offsets(&self, count: usize) -> Vec<f32> {
        let start = -self.spouse_row_width(count) / 2.0 + self.card_width / 2.0;
        (0..count)
            .map(|slot| start + slot as f32 * (self.card_width + self.spouse_h_gap))
            .collect()
    }

    pub fn layer_spacing(&self) -> f32 {
        let needed = self.spouse_row_bottom()
            + self.toggle_stem
            + self.toggle_slot()
            + self.toggle_radius
            + self.card_height / 2.0
            + self.toggle_stem;
        self.level_gap.max(needed)
    }
}

pub fn footprint_width(
    member: &Member,
    index: &MemberIndex<'_>,
    collapse: &CollapseState,
    config: &LayoutConfig,
) -> f32 {
    let spouses = index.spouses_of(member).len();
    if spouses == 0 || collapse.is_spouse_row_collapsed(&member.id) {
        return config.card_width;
    }
    config.card_width.max(config.spouse_row_width(spouses))
}

pub fn separation(width_a: f32, width_b: f32, config: &LayoutConfig) -> f32 {
    (width_a + width_b) / 2.0 / config.node_spacing() + config.separation_padding
}

struct WalkNode {
    parent: usize,
    children: Vec<usize>,
    number: usize,
    width: f32,
    prelim: f32,
    modifier: f32,
    change: f32,
    shift: f32,
    thread: Option<usize>,
    ancestor: usize,
    default_ancestor: Option<usize>,
}

struct TidyTree<'c> {
    nodes: Vec<WalkNode>,
    config: &'c LayoutConfig,
}

impl TidyTree<'_> {
    fn separation(&self, a: usize, b: usize) -> f32 {
        separation(self.nodes[a].width, self.nodes[b].width, self.config)
    }

    fn next_left(&self, v: usize) -> Option<usize> {
        self.nodes[v].children.first().copied().or(self.nodes[v].thread)
    }

    fn next_right(&self, v: usize) -> Option<usize> {
        self.nodes[v].children.last().copied().or(self.nodes[v].thread)
    }

    fn left_sibling(&self, v: usize) -> Option<usize> {
        let number = self.nodes[v].number;
        if number == 0 {
            return None;
        }
        let parent = self.nodes[v].parent;
        self.nodes[parent].children.get(number - 1).copied()
    }

    fn first_walk(&mut self, v: usize) {
        let left = self.left_sibling(v);

        if let (Some(&first), Some(&last)) =
            (self.nodes[v].children.first(), self.nodes[v].children.last())
        {
            self.execute_shifts(v);
            let midpoint = (self.nodes[first].prelim + self.nodes[last].prelim) / 2.0;
            if let Some(left) = left {
                self.nodes[v].prelim = self.nodes[left].prelim + self.separation(v, left);
                self.nodes[v].modifier = self.nodes[v].prelim - midpoint;
            } else {
                self.nodes[v].prelim = midpoint;
            }
        } else if let Some(left) = left {
            self.nodes[v].prelim = self.nodes[left].prelim + self.separation(v, left);
        }

        let parent = self.nodes[v].parent;
        let ancestor = self.nodes[parent]
            .default_ancestor
            .unwrap_or(self.nodes[parent].children[0]);
        let ancestor = self.apportion(v, left, ancestor);
        self.nodes[parent].default_ancestor = Some(ancestor);
    }

    fn apportion(&mut self, v: usize, left: Option<usize>, mut ancestor: usize) -> usize {
        let Some(left) = left else {
            return ancestor;
        };

        let parent = self.nodes[v].parent;
        let mut outer_left = self.nodes[parent].children[0];
        let mut outer_right = v;
        let mut shift_inner_right = self.nodes[v].modifier;
        let mut shift_outer_right = self.nodes[v].modifier;
        let mut shift_inner_left = self.nodes[left].modifier;
        let mut shift_outer_left = self.nodes[outer_left].modifier;

        let mut inner_left = self.next_right(left);
        let mut inner_right = self.next_left(v);

        while let (Some(il), Some(ir)) = (inner_left, inner_right) {
            let (Some(ol), Some(or)) = (self.next_left(outer_left), self.next_right(outer_right))
            else {
                break;
            };
            outer_left = ol;
            outer_right = or;
            self.nodes[outer_right].ancestor = v;

            let shift = self.nodes[il].prelim + shift_inner_left
                - self.nodes[ir].prelim
                - shift_inner_right
                + self.separation(il, ir);
            if shift > 0.0 {
                let moving = self.next_ancestor(il, v, ancestor);
                self.move_subtree(moving, v, shift);
                shift_inner_right += shift;
                shift_outer_right += shift;
            }

            shift_inner_left += self.nodes[il].modifier;
            shift_inner_right += self.nodes[ir].modifier;
            shift_outer_left += self.nodes[outer_left].modifier;
            shift_outer_right += self.nodes[outer_right].modifier;

            inner_left = self.next_right(il);
            inner_right = self.next_left(ir);
        }

        if let Some(il) = inner_left
            && self.next_right(outer_right).is_none()
        {
            self.nodes[outer_right].thread = Some(il);
            self.nodes[outer_right].modifier += shift_inner_left - shift_outer_right;
        }

        if let Some(ir) = inner_right
            && self.next_left(outer_left).is_none()
        {
            self.nodes[outer_left].thread = Some(ir);
            self.nodes[outer_left].modifier += shift_inner_right - shift_outer_left;
            ancestor = v;
        }

        ancestor
    }

    fn next_ancestor(&self, inner_left: usize, v: usize, ancestor: usize) -> usize {
        let candidate = self.nodes[inner_left].ancestor;
        if self.nodes[candidate].parent == self.nodes[v].parent {
            candidate
        } else {
            ancestor
        }
    }

    fn move_subtree(&mut self, left: usize, right: usize, shift: f32) {
        let subtrees = self.nodes[right].number.saturating_sub(self.nodes[left].number).max(1);
        let change = shift / subtrees as f32;
        self.nodes[right].change -= change;
        self.nodes[right].shift += shift;
        self.nodes[left].change += change;
        self.nodes[right].prelim += shift;
        self.nodes[right].modifier += shift;
    }

    fn execute_shifts(&mut self, v: usize) {
        let mut shift = 0.0;
        let mut change = 0.0;
        let children = self.nodes[v].children.clone();
        for &child in children.iter().rev() {
            self.nodes[child].prelim += shift;
            self.nodes[child].modifier += shift;
            change += self.nodes[child].change;
            shift += self.nodes[child].shift + change;
        }
    }
}

pub fn layout_pedigree(
    pedigree: &Pedigree<'_>,
    index: &MemberIndex<'_>,
    collapse: &CollapseState,
    config: &LayoutConfig,
) -> Vec<Vec2> {
    let count = pedigree.len();
    if count == 0 {
        return Vec::new();
    }

    // One extra node above the root keeps the walks free of root special cases.
    let virtual_root = count;
    let mut nodes = pedigree
        .nodes()
        .iter()
        .enumerate()
        .map(|(slot, node)| WalkNode {
            parent: node.parent.unwrap_or(virtual_root),
            children: node.children.clone(),
            number: 0,
            width: footprint_width(node.member, index, collapse, config),
            prelim: 0.0,
            modifier: 0.0,
            change: 0.0,
            shift: 0.0,
            thread: None,
            ancestor: slot,
            default_ancestor: None,
        })
        .collect::<Vec<_>>();
    nodes.push(WalkNode {
        parent: virtual_root,
        children: vec![0],
        number: 0,
        width: config.card_width,
        prelim: 0.0,
        modifier: 0.0,
        change: 0.0,
        shift: 0.0,
        thread: None,
        ancestor: virtual_root,
        default_ancestor: None,
    });

    for slot in 0..count {
        let children = nodes[slot].children.clone();
        for (number, child) in children.into_iter().enumerate() {
            nodes[child].number = number;
        }
    }

    let mut tree = TidyTree { nodes, config };

    for v in post_order(pedigree) {
        tree.first_walk(v);
    }

    tree.nodes[virtual_root].modifier = -tree.nodes[0].prelim;

    // Breadth-first node order already visits parents before children.
    let spacing = config.node_spacing();
    let layer = config.layer_spacing();
    let mut positions = vec![Vec2::ZERO; count];
    for (slot, node) in pedigree.nodes().iter().enumerate() {
        let parent = tree.nodes[slot].parent;
        let parent_modifier = tree.nodes[parent].modifier;
        tree.nodes[slot].modifier += parent_modifier;
        let x = tree.nodes[slot].prelim + parent_modifier;
        positions[slot] = vec2(x * spacing, node.depth as f32 * layer);
    }
    positions
}

/// Children before parents, left subtrees before right ones.
fn post_order(pedigree: &Pedigree<'_>) -> Vec<usize> {
    let mut order = Vec::with_capacity(pedigree.len());
    let mut stack = vec![0usize];
    while let Some(v) = stack.pop() {
        order.push(v);
        stack.extend(pedigree.nodes()[v].children.iter().copied());
    }
    order.reverse();
    order
}
