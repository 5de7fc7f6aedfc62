use sea_orm::entity::prelude::*;

/// Daily chemical-balance record. Immutable after insert; `closing` and
/// `reported_balance` are derived server-side at submission time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "chemical_forms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub date: Date,
    pub unit: String,
    pub chemical: String,
    pub uom: String,
    pub sap_code: String,
    pub opening: Decimal,
    pub received: Decimal,
    pub consumption: Decimal,
    pub closing: Decimal,
    pub reported_balance: Decimal,
    pub remarks: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id"
    )]
    Owner,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
