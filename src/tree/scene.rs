use std::collections::HashMap;

use eframe::egui::{Pos2, Rect, Vec2, pos2, vec2};
use tracing::debug;

use crate::genealogy::{Member, MemberIndex};

use super::build::{build_pedigree, listed_mother, parent_identity};
use super::collapse::CollapseState;
use super::layout::{LayoutConfig, layout_pedigree};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardKind {
    Primary,
    Spouse { primary_id: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub member_id: String,
    pub center: Pos2,
    pub kind: CardKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ToggleTarget {
    SpouseRow(String),
    Children(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toggle {
    pub center: Pos2,
    pub collapsed: bool,
    pub target: ToggleTarget,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectorKind {
    Marriage,
    Stem,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connector {
    pub from: Pos2,
    pub to: Pos2,
    pub kind: ConnectorKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParentEdge {
    pub parent_id: String,
    pub child_id: String,
    pub points: [Pos2; 4],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub cards: Vec<Card>,
    pub toggles: Vec<Toggle>,
    pub connectors: Vec<Connector>,
    pub edges: Vec<ParentEdge>,
    pub card_size: Vec2,
    pub toggle_radius: f32,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card_rect(&self, card: &Card) -> Rect {
        Rect::from_center_size(card.center, self.card_size)
    }

    #[cfg(test)]
    pub(crate) fn bounds(&self) -> Option<Rect> {
        self.cards
            .iter()
            .map(|card| self.card_rect(card))
            .reduce(|acc, rect| acc.union(rect))
    }

    pub fn toggle_at(&self, world: Pos2) -> Option<&Toggle> {
        self.toggles
            .iter()
            .find(|toggle| toggle.center.distance(world) <= self.toggle_radius)
    }

    /// Later cards are painted on top, so they win the hit-test.
    pub fn card_at(&self, world: Pos2) -> Option<&Card> {
        self.cards
            .iter()
            .rev()
            .find(|card| self.card_rect(card).contains(world))
    }

    #[cfg(test)]
    pub(crate) fn card_of(&self, member_id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.member_id == member_id)
    }
}

struct OwnAnchor {
    edge_y: f32,
    toggle_y: f32,
}

fn own_anchor(spouse_count: usize, row_collapsed: bool, config: &LayoutConfig) -> OwnAnchor {
    let primary_bottom = config.card_height / 2.0;
    if spouse_count == 0 {
        OwnAnchor {
            edge_y: primary_bottom,
            toggle_y: primary_bottom + config.toggle_stem,
        }
    } else if row_collapsed {
        // Stacked under the spouse-row toggle, which already sits on this stem.
        OwnAnchor {
            edge_y: primary_bottom,
            toggle_y: config.bracket_y() + config.toggle_slot(),
        }
    } else {
        let row_bottom = config.spouse_row_bottom();
        OwnAnchor {
            edge_y: row_bottom,
            toggle_y: row_bottom + config.toggle_stem + config.toggle_slot(),
        }
    }
}

fn parent_edge(
    parent_id: &str,
    child: &Member,
    from: Pos2,
    child_center: Pos2,
    config: &LayoutConfig,
) -> ParentEdge {
    let to = child_center - vec2(0.0, config.card_height / 2.0);
    let mid_y = (from.y + to.y) / 2.0;
    ParentEdge {
        parent_id: parent_id.to_owned(),
        child_id: child.id.clone(),
        points: [from, pos2(from.x, mid_y), pos2(to.x, mid_y), to],
    }
}

/// Builds, lays out and converts the visible pedigree of `family_id`.
pub fn build_scene(
    members: &[Member],
    family_id: &str,
    collapse: &CollapseState,
    config: &LayoutConfig,
) -> Scene {
    let mut scene = Scene {
        card_size: vec2(config.card_width, config.card_height),
        toggle_radius: config.toggle_radius,
        ..Scene::default()
    };

    let index = MemberIndex::new(members);
    let pedigree = build_pedigree(members, family_id, collapse);
    if pedigree.is_empty() {
        return scene;
    }
    let positions = layout_pedigree(&pedigree, &index, collapse, config);

    // Every clan child per father, visible or not: toggles must survive collapse.
    let mut clan_children: HashMap<&str, Vec<&Member>> = HashMap::new();
    for member in members.iter().filter(|member| member.family_id == family_id) {
        if let Some(father) = member.father_id.as_deref() {
            clan_children.entry(father).or_default().push(member);
        }
    }

    let mut spouse_centers: HashMap<(usize, &str), Pos2> = HashMap::new();
    let mut own_anchors: Vec<f32> = Vec::with_capacity(pedigree.len());

    for (node, position) in pedigree.nodes().iter().zip(&positions) {
        let member = node.member;
        let center = position.to_pos2();
        let slot = own_anchors.len();
        let spouses = index.spouses_of(member);
        let row_collapsed = collapse.is_spouse_row_collapsed(&member.id);
        let children = clan_children
            .get(member.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default();

        scene.cards.push(Card {
            member_id: member.id.clone(),
            center,
            kind: CardKind::Primary,
        });

        let primary_bottom = center + vec2(0.0, config.card_height / 2.0);
        if !spouses.is_empty() {
            let bracket_y = center.y + config.bracket_y();
            scene.toggles.push(Toggle {
                center: pos2(center.x, bracket_y),
                collapsed: row_collapsed,
                target: ToggleTarget::SpouseRow(member.id.clone()),
            });
            scene.connectors.push(Connector {
                from: primary_bottom,
                to: pos2(center.x, bracket_y),
                kind: ConnectorKind::Marriage,
            });

            if !row_collapsed {
                let offsets = config.spouse_offsets(spouses.len());
                let (left, right) = (offsets[0], offsets[offsets.len() - 1]);
                scene.connectors.push(Connector {
                    from: pos2(center.x + left, bracket_y),
                    to: pos2(center.x + right, bracket_y),
                    kind: ConnectorKind::Marriage,
                });

                for (spouse, offset) in spouses.iter().zip(offsets) {
                    let spouse_center = center + vec2(offset, config.spouse_row_y());
                    let spouse_top = spouse_center - vec2(0.0, config.card_height / 2.0);
                    scene.connectors.push(Connector {
                        from: pos2(spouse_top.x, bracket_y),
                        to: spouse_top,
                        kind: ConnectorKind::Marriage,
                    });
                    scene.cards.push(Card {
                        member_id: spouse.id.clone(),
                        center: spouse_center,
                        kind: CardKind::Spouse {
                            primary_id: member.id.clone(),
                        },
                    });
                    spouse_centers.insert((slot, spouse.id.as_str()), spouse_center);

                    let has_children = children
                        .iter()
                        .any(|child| child.mother_id.as_deref() == Some(spouse.id.as_str()));
                    if has_children {
                        let spouse_bottom = spouse_center + vec2(0.0, config.card_height / 2.0);
                        let toggle_center = spouse_bottom + vec2(0.0, config.toggle_stem);
                        scene.connectors.push(Connector {
                            from: spouse_bottom,
                            to: toggle_center,
                            kind: ConnectorKind::Stem,
                        });
                        scene.toggles.push(Toggle {
                            center: toggle_center,
                            collapsed: collapse.are_children_collapsed(&spouse.id),
                            target: ToggleTarget::Children(spouse.id.clone()),
                        });
                    }
                }
            }
        }

        let anchor = own_anchor(spouses.len(), row_collapsed, config);
        own_anchors.push(anchor.edge_y);

        let has_motherless = children
            .iter()
            .any(|child| parent_identity(child, &index) == Some(member.id.as_str()));
        if has_motherless {
            let toggle_center = pos2(center.x, center.y + anchor.toggle_y);
            scene.connectors.push(Connector {
                from: pos2(center.x, center.y + anchor.edge_y),
                to: toggle_center,
                kind: ConnectorKind::Stem,
            });
            scene.toggles.push(Toggle {
                center: toggle_center,
                collapsed: collapse.are_children_collapsed(&member.id),
                target: ToggleTarget::Children(member.id.clone()),
            });
        }
    }

    for (slot, node) in pedigree.nodes().iter().enumerate() {
        let Some(parent_slot) = node.parent else {
            continue;
        };
        let father = pedigree.nodes()[parent_slot].member;
        let father_center = positions[parent_slot].to_pos2();
        let child_center = positions[slot].to_pos2();

        let from_spouse = listed_mother(father, node.member, &index).and_then(|mother| {
            spouse_centers
                .get(&(parent_slot, mother))
                .map(|center| (mother, *center + vec2(0.0, config.card_height / 2.0)))
        });
        let (parent_id, from) = from_spouse.unwrap_or((
            father.id.as_str(),
            father_center + vec2(0.0, own_anchors[parent_slot]),
        ));
        scene
            .edges
            .push(parent_edge(parent_id, node.member, from, child_center, config));
    }

    debug!(
        family_id,
        cards = scene.cards.len(),
        toggles = scene.toggles.len(),
        edges = scene.edges.len(),
        "scene rebuilt"
    );
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::fixtures::{child_of, male, three_wives};

    fn scene_for(members: &[Member], collapse: &CollapseState) -> Scene {
        build_scene(members, "clan", collapse, &LayoutConfig::default())
    }

    fn toggle<'s>(scene: &'s Scene, target: &ToggleTarget) -> Option<&'s Toggle> {
        scene.toggles.iter().find(|toggle| &toggle.target == target)
    }

    #[test]
    fn test_card_counts_follow_collapse() {
        let members = three_wives();
        let mut collapse = CollapseState::new();
        assert_eq!(scene_for(&members, &collapse).cards.len(), 13);

        collapse.toggle_children("s2");
        assert_eq!(scene_for(&members, &collapse).cards.len(), 10);

        collapse.toggle_spouse_row("root");
        assert_eq!(scene_for(&members, &collapse).cards.len(), 1);
    }

    #[test]
    fn test_spouse_row_geometry() {
        let members = three_wives();
        let scene = scene_for(&members, &CollapseState::new());

        let spouses = scene
            .cards
            .iter()
            .filter(|card| matches!(card.kind, CardKind::Spouse { .. }))
            .map(|card| (card.member_id.as_str(), card.center))
            .collect::<Vec<_>>();
        assert_eq!(
            spouses,
            vec![
                ("s1", pos2(-160.0, 110.0)),
                ("s2", pos2(0.0, 110.0)),
                ("s3", pos2(160.0, 110.0)),
            ]
        );

        let row_toggle = toggle(&scene, &ToggleTarget::SpouseRow("root".into())).expect("row toggle");
        assert_eq!(row_toggle.center, pos2(0.0, 55.0));
        assert!(!row_toggle.collapsed);

        let bracket = scene
            .connectors
            .iter()
            .find(|connector| connector.from.y == 55.0 && connector.to.y == 55.0)
            .expect("bracket");
        assert_eq!((bracket.from.x, bracket.to.x), (-160.0, 160.0));
    }

    #[test]
    fn test_edges_start_at_the_mothers_card() {
        let members = three_wives();
        let scene = scene_for(&members, &CollapseState::new());

        let edge = scene
            .edges
            .iter()
            .find(|edge| edge.child_id == "c3_1")
            .expect("edge to c3_1");
        let child = scene.card_of("c3_1").expect("child card");

        assert_eq!(edge.parent_id, "s3");
        assert_eq!(edge.points[0], pos2(160.0, 145.0));
        assert_eq!(edge.points[3], child.center - vec2(0.0, 35.0));
        let mid_y = (edge.points[0].y + edge.points[3].y) / 2.0;
        assert_eq!(edge.points[1], pos2(160.0, mid_y));
        assert_eq!(edge.points[2], pos2(child.center.x, mid_y));
    }

    #[test]
    fn test_collapsed_toggles_stay_visible() {
        let members = three_wives();
        let mut collapse = CollapseState::new();
        collapse.toggle_children("s1");
        let scene = scene_for(&members, &collapse);

        let wife_toggle = toggle(&scene, &ToggleTarget::Children("s1".into())).expect("s1 toggle");
        assert!(wife_toggle.collapsed);
        assert_eq!(wife_toggle.center, pos2(-160.0, 165.0));
        assert!(!scene.edges.iter().any(|edge| edge.parent_id == "s1"));

        collapse.toggle_spouse_row("root");
        let scene = scene_for(&members, &collapse);
        let row_toggle = toggle(&scene, &ToggleTarget::SpouseRow("root".into())).expect("row toggle");
        assert!(row_toggle.collapsed);
        assert!(toggle(&scene, &ToggleTarget::Children("s1".into())).is_none());
    }

    #[test]
    fn test_motherless_children_hang_from_the_father() {
        let mut members = vec![male("root", "clan")];
        members.push(child_of("kid", "clan", "root", None));
        let scene = scene_for(&members, &CollapseState::new());

        let edge = &scene.edges[0];
        assert_eq!(edge.parent_id, "root");
        assert_eq!(edge.points[0], pos2(0.0, 35.0));

        let kids_toggle = toggle(&scene, &ToggleTarget::Children("root".into())).expect("toggle");
        assert_eq!(kids_toggle.center, pos2(0.0, 55.0));
        assert!(toggle(&scene, &ToggleTarget::SpouseRow("root".into())).is_none());
    }

    #[test]
    fn test_motherless_anchor_moves_below_expanded_row() {
        let mut members = three_wives();
        members.push(child_of("stray", "clan", "root", None));
        let config = LayoutConfig::default();
        let scene = scene_for(&members, &CollapseState::new());

        let edge = scene
            .edges
            .iter()
            .find(|edge| edge.child_id == "stray")
            .expect("edge to stray");
        assert_eq!(edge.parent_id, "root");
        assert_eq!(edge.points[0], pos2(0.0, config.spouse_row_bottom()));

        let own = toggle(&scene, &ToggleTarget::Children("root".into())).expect("toggle");
        let wife = toggle(&scene, &ToggleTarget::Children("s2".into())).expect("s2 toggle");
        assert!(own.center.y - wife.center.y >= 2.0 * config.toggle_radius);
    }

    #[test]
    fn test_hit_testing_prefers_toggles_and_misses_empty_space() {
        let members = three_wives();
        let scene = scene_for(&members, &CollapseState::new());

        assert_eq!(scene.card_at(pos2(0.0, 0.0)).map(|c| c.member_id.as_str()), Some("root"));
        assert_eq!(scene.card_at(pos2(-160.0, 130.0)).map(|c| c.member_id.as_str()), Some("s1"));
        assert!(scene.toggle_at(pos2(2.0, 56.0)).is_some());
        assert!(scene.card_at(pos2(0.0, 55.0)).is_none());
        assert!(scene.card_at(pos2(5000.0, 5000.0)).is_none());
    }

    #[test]
    fn test_empty_family_gives_empty_scene() {
        let members = three_wives();
        let scene = build_scene(&members, "missing", &CollapseState::new(), &LayoutConfig::default());
        assert!(scene.is_empty());
        assert!(scene.bounds().is_none());
    }
}
