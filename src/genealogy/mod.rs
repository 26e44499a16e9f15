mod model;
mod seed;
mod store;

pub use model::{
    AncestralSeat, Family, FamilyEvent, GenealogyData, Gender, Member, MemberIndex, Surname,
    Tanghao,
};
pub use store::{GenealogyStore, StoreError, generate_id};
