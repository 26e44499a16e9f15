use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AncestralSeat {
    pub name: String,
    pub region: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tanghao {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub couplet: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Surname {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default, rename = "junwangs")]
    pub seats: Vec<AncestralSeat>,
    #[serde(default)]
    pub tanghao: Vec<Tanghao>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyEvent {
    pub year: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: String,
    pub name: String,
    pub surname_id: String,
    /// Empty when the family is not tied to a specific hall.
    #[serde(default)]
    pub tanghao_id: String,
    #[serde(default)]
    pub founder: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub creator_id: String,
    /// Generational naming poem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zibei: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration: Option<String>,
    #[serde(default)]
    pub events: Vec<FamilyEvent>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub family_id: String,
    pub name: String,
    pub gender: Gender,
    pub generation: i32,
    #[serde(default)]
    pub father_id: Option<String>,
    #[serde(default)]
    pub mother_id: Option<String>,
    #[serde(default)]
    pub spouse_ids: Vec<String>,
    #[serde(default)]
    pub birth_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Member {
    pub fn new(id: impl Into<String>, family_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            family_id: family_id.into(),
            name: name.into(),
            gender: Gender::Male,
            generation: 1,
            father_id: None,
            mother_id: None,
            spouse_ids: Vec::new(),
            birth_date: String::new(),
            death_date: None,
            bio: String::new(),
            photo: None,
        }
    }

    pub fn is_deceased(&self) -> bool {
        self.death_date
            .as_deref()
            .is_some_and(|date| !date.trim().is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenealogyData {
    #[serde(default)]
    pub surnames: Vec<Surname>,
    #[serde(default)]
    pub families: Vec<Family>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl GenealogyData {
    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn family(&self, id: &str) -> Option<&Family> {
        self.families.iter().find(|family| family.id == id)
    }

    pub fn surname(&self, id: &str) -> Option<&Surname> {
        self.surnames.iter().find(|surname| surname.id == id)
    }

    /// Hall of a family, looked up through its surname. Dangling ids yield `None`.
    pub fn tanghao_of(&self, family: &Family) -> Option<&Tanghao> {
        if family.tanghao_id.is_empty() {
            return None;
        }
        self.surname(&family.surname_id)?
            .tanghao
            .iter()
            .find(|hall| hall.id == family.tanghao_id)
    }

    pub fn family_members<'a>(&'a self, family_id: &'a str) -> impl Iterator<Item = &'a Member> {
        self.members
            .iter()
            .filter(move |member| member.family_id == family_id)
    }

    pub fn living_count(&self) -> usize {
        self.members
            .iter()
            .filter(|member| !member.is_deceased())
            .count()
    }

    pub fn upsert_surname(&mut self, surname: Surname) {
        match self.surnames.iter_mut().find(|entry| entry.id == surname.id) {
            Some(entry) => *entry = surname,
            None => self.surnames.push(surname),
        }
    }

    pub fn upsert_family(&mut self, family: Family) {
        match self.families.iter_mut().find(|entry| entry.id == family.id) {
            Some(entry) => *entry = family,
            None => self.families.push(family),
        }
    }

    pub fn upsert_member(&mut self, member: Member) {
        match self.members.iter_mut().find(|entry| entry.id == member.id) {
            Some(entry) => *entry = member,
            None => self.members.push(member),
        }
    }

    pub fn remove_surname(&mut self, id: &str) -> bool {
        let before = self.surnames.len();
        self.surnames.retain(|surname| surname.id != id);
        self.surnames.len() != before
    }

    /// Removes the family and every member born into it. References other
    /// families hold to those members stay dangling and read as absent.
    pub fn remove_family(&mut self, id: &str) -> usize {
        self.families.retain(|family| family.id != id);
        let before = self.members.len();
        self.members.retain(|member| member.family_id != id);
        before - self.members.len()
    }

    /// Removes the member and scrubs every father/mother/spouse reference to it.
    pub fn remove_member(&mut self, id: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member.id != id);
        if self.members.len() == before {
            return false;
        }

        for member in &mut self.members {
            if member.father_id.as_deref() == Some(id) {
                member.father_id = None;
            }
            if member.mother_id.as_deref() == Some(id) {
                member.mother_id = None;
            }
            member.spouse_ids.retain(|spouse| spouse != id);
        }
        true
    }
}

/// Id lookup over a member slice, rebuilt per render from the live collection.
pub struct MemberIndex<'a> {
    by_id: HashMap<&'a str, &'a Member>,
}

impl<'a> MemberIndex<'a> {
    pub fn new(members: &'a [Member]) -> Self {
        let mut by_id = HashMap::with_capacity(members.len());
        for member in members {
            by_id.entry(member.id.as_str()).or_insert(member);
        }
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Member> {
        self.by_id.get(id).copied()
    }

    pub fn resolve(&self, id: Option<&str>) -> Option<&'a Member> {
        id.and_then(|id| self.get(id))
    }

    /// Listed spouses that still resolve, in spouse-list order.
    pub fn spouses_of(&self, member: &Member) -> Vec<&'a Member> {
        member
            .spouse_ids
            .iter()
            .filter_map(|id| self.get(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, family: &str) -> Member {
        Member::new(id, family, id)
    }

    fn sample() -> GenealogyData {
        let mut father = member("f", "clan");
        father.spouse_ids = vec!["w".into()];
        let mut wife = member("w", "other");
        wife.gender = Gender::Female;
        wife.spouse_ids = vec!["f".into()];
        let mut child = member("c", "clan");
        child.father_id = Some("f".into());
        child.mother_id = Some("w".into());

        GenealogyData {
            surnames: vec![Surname {
                id: "s".into(),
                name: "Huang".into(),
                tanghao: vec![Tanghao {
                    id: "t".into(),
                    name: "Jiangxia Hall".into(),
                    ..Tanghao::default()
                }],
                ..Surname::default()
            }],
            families: vec![
                Family {
                    id: "clan".into(),
                    name: "Jiangxia Huang".into(),
                    surname_id: "s".into(),
                    tanghao_id: "t".into(),
                    ..Family::default()
                },
                Family {
                    id: "other".into(),
                    name: "Tianshui Jiang".into(),
                    surname_id: "missing".into(),
                    tanghao_id: "t".into(),
                    ..Family::default()
                },
            ],
            members: vec![father, wife, child],
        }
    }

    #[test]
    fn test_remove_member_scrubs_references() {
        let mut data = sample();
        assert!(data.remove_member("w"));

        assert!(data.member("w").is_none());
        for member in &data.members {
            assert_ne!(member.mother_id.as_deref(), Some("w"));
            assert_ne!(member.father_id.as_deref(), Some("w"));
            assert!(!member.spouse_ids.iter().any(|id| id == "w"));
        }

        assert!(data.remove_member("f"));
        let child = data.member("c").expect("child kept");
        assert_eq!(child.father_id, None);
    }

    #[test]
    fn test_remove_unknown_member_is_noop() {
        let mut data = sample();
        let before = data.clone();
        assert!(!data.remove_member("nobody"));
        assert_eq!(data, before);
    }

    #[test]
    fn test_remove_family_cascades_to_members() {
        let mut data = sample();
        let removed = data.remove_family("clan");

        assert_eq!(removed, 2);
        assert!(data.family("clan").is_none());
        assert!(data.members.iter().all(|member| member.family_id != "clan"));

        // The wife still points at her deleted husband; lookups degrade to None.
        let wife = data.member("w").expect("wife kept");
        assert_eq!(wife.spouse_ids, vec!["f".to_string()]);
        let index = MemberIndex::new(&data.members);
        assert!(index.spouses_of(wife).is_empty());
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let mut data = sample();
        let mut renamed = data.member("c").cloned().expect("child");
        renamed.name = "Renamed".into();
        data.upsert_member(renamed);
        data.upsert_member(member("new", "clan"));

        assert_eq!(data.members.len(), 4);
        assert_eq!(data.member("c").map(|m| m.name.as_str()), Some("Renamed"));
    }

    #[test]
    fn test_tanghao_lookup_degrades_on_dangling_surname() {
        let data = sample();
        let clan = data.family("clan").expect("clan");
        let other = data.family("other").expect("other");

        assert_eq!(
            data.tanghao_of(clan).map(|hall| hall.name.as_str()),
            Some("Jiangxia Hall")
        );
        assert!(data.tanghao_of(other).is_none());
    }

    #[test]
    fn test_deserializes_camel_case_document() {
        let raw = r#"{
            "surnames": [{"id": "s", "name": "Huang", "origin": "", "junwangs": [{"name": "Jiangxia", "region": "Hubei", "description": ""}], "tanghao": []}],
            "families": [{"id": "f", "name": "Jiangxia Huang", "surnameId": "s", "tanghaoId": "", "founder": "", "origin": "", "description": "", "creatorId": "sys"}],
            "members": [{"id": "m", "familyId": "f", "name": "Huang", "gender": "male", "generation": 21, "fatherId": null, "spouseIds": [], "birthDate": "1960-05-20", "bio": ""}]
        }"#;

        let data: GenealogyData = serde_json::from_str(raw).expect("valid document");
        assert_eq!(data.surnames[0].seats[0].region, "Hubei");
        assert_eq!(data.members[0].generation, 21);
        assert_eq!(data.members[0].mother_id, None);
        assert_eq!(data.living_count(), 1);
    }
}
