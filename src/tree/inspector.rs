use crate::genealogy::{Member, MemberIndex};

#[derive(Debug, Default, PartialEq)]
pub struct Relations<'a> {
    pub father: Option<&'a Member>,
    pub mother: Option<&'a Member>,
    /// In collection order, not spouse-list order.
    pub spouses: Vec<&'a Member>,
}

pub fn resolve_relations<'a>(members: &'a [Member], member: &Member) -> Relations<'a> {
    let index = MemberIndex::new(members);
    Relations {
        father: index.resolve(member.father_id.as_deref()),
        mother: index.resolve(member.mother_id.as_deref()),
        spouses: members
            .iter()
            .filter(|candidate| member.spouse_ids.contains(&candidate.id))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::fixtures::{child_of, female, male, three_wives};

    #[test]
    fn test_relations_of_a_child() {
        let members = three_wives();
        let child = members
            .iter()
            .find(|member| member.id == "c2_1")
            .expect("fixture child");
        let relations = resolve_relations(&members, child);

        assert_eq!(relations.father.map(|m| m.id.as_str()), Some("root"));
        assert_eq!(relations.mother.map(|m| m.id.as_str()), Some("s2"));
        assert!(relations.spouses.is_empty());
    }

    #[test]
    fn test_spouses_follow_collection_order() {
        let mut root = male("root", "clan");
        root.spouse_ids = vec!["b".into(), "a".into()];
        let members = vec![root.clone(), female("a", "x"), female("b", "y")];

        let relations = resolve_relations(&members, &root);
        let ids = relations
            .spouses
            .iter()
            .map(|spouse| spouse.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_dangling_references_are_absent() {
        let mut orphan = child_of("orphan", "clan", "ghost", Some("phantom"));
        orphan.spouse_ids = vec!["nobody".into()];
        let members = vec![orphan.clone()];

        assert_eq!(resolve_relations(&members, &orphan), Relations::default());
    }
}
