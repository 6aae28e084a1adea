//! The stored procedures this service calls, with their positional signatures.

use crate::sql::{BindValue, NoRows, Procedure, Rows, SingleRow};

/// `list_hardware_items(name, skip, limit)`; `name` NULL lists everything.
pub struct ListHardwareItems<'a> {
    pub name: Option<&'a str>,
    pub skip: u32,
    pub limit: u32,
}

impl Procedure<3> for ListHardwareItems<'_> {
    const NAME: &'static str = "list_hardware_items";
    type Shape = Rows;

    fn args(&self) -> [BindValue; 3] {
        [self.name.into(), self.skip.into(), self.limit.into()]
    }
}

pub struct CreateHardwareItem<'a> {
    pub name: &'a str,
    pub label: &'a str,
    pub category: &'a str,
    pub description: Option<&'a str>,
}

impl Procedure<4> for CreateHardwareItem<'_> {
    const NAME: &'static str = "create_hardware_item";
    type Shape = NoRows;

    fn args(&self) -> [BindValue; 4] {
        [
            self.name.into(),
            self.label.into(),
            self.category.into(),
            self.description.into(),
        ]
    }
}

pub struct CreateManyHardwareItems<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub description: Option<&'a str>,
    pub link: Option<&'a str>,
    pub quantity: i64,
}

impl Procedure<5> for CreateManyHardwareItems<'_> {
    const NAME: &'static str = "create_many_hardware_items";
    type Shape = NoRows;

    fn args(&self) -> [BindValue; 5] {
        [
            self.name.into(),
            self.category.into(),
            self.description.into(),
            self.link.into(),
            self.quantity.into(),
        ]
    }
}

pub struct ReadHardwareItem {
    pub id: i64,
}

impl Procedure<1> for ReadHardwareItem {
    const NAME: &'static str = "read_hardware_item";
    type Shape = SingleRow;

    fn args(&self) -> [BindValue; 1] {
        [self.id.into()]
    }
}

/// Returns the item with its details as one JSON document through an OUT parameter.
pub struct ReadCombinedHardwareDetails {
    pub id: i64,
}

impl Procedure<1> for ReadCombinedHardwareDetails {
    const NAME: &'static str = "read_combined_hardware_details";
    const OUT_PARAM: Option<&'static str> = Some("result");
    type Shape = SingleRow;

    fn args(&self) -> [BindValue; 1] {
        [self.id.into()]
    }
}

pub struct UpdateHardwareItem<'a> {
    pub id: i64,
    pub name: &'a str,
    pub label: &'a str,
    pub category: &'a str,
    pub description: Option<&'a str>,
}

impl Procedure<5> for UpdateHardwareItem<'_> {
    const NAME: &'static str = "update_hardware_item";
    type Shape = NoRows;

    fn args(&self) -> [BindValue; 5] {
        [
            self.id.into(),
            self.name.into(),
            self.label.into(),
            self.category.into(),
            self.description.into(),
        ]
    }
}

pub struct DeleteHardwareItem {
    pub id: i64,
}

impl Procedure<1> for DeleteHardwareItem {
    const NAME: &'static str = "delete_hardware_item";
    type Shape = NoRows;

    fn args(&self) -> [BindValue; 1] {
        [self.id.into()]
    }
}

pub struct ChangeHardwareItemStatus<'a> {
    pub id: i64,
    pub status: &'a str,
}

impl Procedure<2> for ChangeHardwareItemStatus<'_> {
    const NAME: &'static str = "change_hardware_item_status";
    type Shape = NoRows;

    fn args(&self) -> [BindValue; 2] {
        [self.id.into(), self.status.into()]
    }
}

pub struct ListCategories;

impl Procedure<0> for ListCategories {
    const NAME: &'static str = "list_categories";
    type Shape = Rows;

    fn args(&self) -> [BindValue; 0] {
        []
    }
}
