use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::genealogy::{Member, MemberIndex};

use super::collapse::CollapseState;

#[derive(Debug)]
pub struct PedigreeNode<'a> {
    pub member: &'a Member,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub depth: usize,
}

/// Nodes are in breadth-first order; the root is index 0.
#[derive(Debug, Default)]
pub struct Pedigree<'a> {
    nodes: Vec<PedigreeNode<'a>>,
    index_by_id: HashMap<&'a str, usize>,
}

impl<'a> Pedigree<'a> {
    pub fn nodes(&self) -> &[PedigreeNode<'a>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<&PedigreeNode<'a>> {
        self.nodes.first()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, member_id: &str) -> bool {
        self.index_by_id.contains_key(member_id)
    }
}

pub fn parent_identity<'m>(child: &'m Member, index: &MemberIndex<'_>) -> Option<&'m str> {
    child
        .mother_id
        .as_deref()
        .filter(|mother| index.get(mother).is_some())
        .or(child.father_id.as_deref())
}

pub fn listed_mother<'m>(
    father: &Member,
    child: &'m Member,
    index: &MemberIndex<'_>,
) -> Option<&'m str> {
    child
        .mother_id
        .as_deref()
        .filter(|mother| index.get(mother).is_some())
        .filter(|mother| father.spouse_ids.iter().any(|spouse| spouse.as_str() == *mother))
}

fn child_visible(
    father: &Member,
    child: &Member,
    index: &MemberIndex<'_>,
    collapse: &CollapseState,
) -> bool {
    if parent_identity(child, index).is_some_and(|identity| collapse.are_children_collapsed(identity))
    {
        return false;
    }

    !(collapse.is_spouse_row_collapsed(&father.id) && listed_mother(father, child, index).is_some())
}

pub fn build_pedigree<'a>(
    members: &'a [Member],
    family_id: &str,
    collapse: &CollapseState,
) -> Pedigree<'a> {
    let clan = members
        .iter()
        .filter(|member| member.family_id == family_id)
        .collect::<Vec<_>>();
    let clan_ids = clan
        .iter()
        .map(|member| member.id.as_str())
        .collect::<HashSet<_>>();

    let tree_parent = |member: &'a Member| -> Option<&'a str> {
        member
            .father_id
            .as_deref()
            .filter(|father| clan_ids.contains(father))
    };

    let Some(root) = clan.iter().copied().find(|member| tree_parent(*member).is_none()) else {
        debug!(family_id, members = clan.len(), "no resolvable root");
        return Pedigree::default();
    };

    let mut children_by_parent: HashMap<&str, Vec<&Member>> = HashMap::new();
    for &member in &clan {
        if let Some(father) = tree_parent(member) {
            children_by_parent.entry(father).or_default().push(member);
        }
    }

    let index = MemberIndex::new(members);
    let mut pedigree = Pedigree::default();
    let mut queue = VecDeque::new();

    pedigree.index_by_id.insert(root.id.as_str(), 0);
    pedigree.nodes.push(PedigreeNode {
        member: root,
        parent: None,
        children: Vec::new(),
        depth: 0,
    });
    queue.push_back(0usize);

    while let Some(current) = queue.pop_front() {
        let father = pedigree.nodes[current].member;
        let depth = pedigree.nodes[current].depth;
        let Some(children) = children_by_parent.get(father.id.as_str()) else {
            continue;
        };

        for &child in children {
            if pedigree.index_by_id.contains_key(child.id.as_str())
                || !child_visible(father, child, &index, collapse)
            {
                continue;
            }

            let child_index = pedigree.nodes.len();
            pedigree.index_by_id.insert(child.id.as_str(), child_index);
            pedigree.nodes.push(PedigreeNode {
                member: child,
                parent: Some(current),
                children: Vec::new(),
                depth: depth + 1,
            });
            pedigree.nodes[current].children.push(child_index);
            queue.push_back(child_index);
        }
    }

    debug!(
        family_id,
        root = %root.id,
        visible = pedigree.len(),
        clan = clan.len(),
        "built pedigree"
    );
    pedigree
}
