mod build;
mod collapse;
mod inspector;
mod layout;
mod scene;

pub use build::{Pedigree, PedigreeNode, build_pedigree, listed_mother, parent_identity};
pub use collapse::CollapseState;
pub use inspector::{Relations, resolve_relations};
pub use layout::{LayoutConfig, footprint_width, layout_pedigree, separation};
pub use scene::{
    Card, CardKind, Connector, ConnectorKind, ParentEdge, Scene, Toggle, ToggleTarget, build_scene,
};

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::genealogy::{Gender, Member};

    pub fn male(id: &str, family: &str) -> Member {
        Member::new(id, family, id)
    }

    pub fn female(id: &str, family: &str) -> Member {
        Member {
            gender: Gender::Female,
            ..Member::new(id, family, id)
        }
    }

    pub fn child_of(id: &str, family: &str, father: &str, mother: Option<&str>) -> Member {
        Member {
            father_id: Some(father.to_owned()),
            mother_id: mother.map(str::to_owned),
            ..Member::new(id, family, id)
        }
    }

    pub fn three_wives() -> Vec<Member> {
        let mut root = male("root", "clan");
        root.generation = 21;
        root.spouse_ids = (1..=3).map(|wife| format!("s{wife}")).collect();

        let mut members = vec![root];
        for wife in 1..=3 {
            let mut spouse = female(&format!("s{wife}"), &format!("w{wife}"));
            spouse.spouse_ids = vec!["root".to_owned()];
            members.push(spouse);
        }
        for wife in 1..=3 {
            for n in 0..3 {
                let mut child = child_of(
                    &format!("c{wife}_{n}"),
                    "clan",
                    "root",
                    Some(&format!("s{wife}")),
                );
                child.generation = 22;
                members.push(child);
            }
        }
        members
    }
}
