use serde_json::{Number, Value};

use super::{
    derived_field, match_id, positive_integer, resource_exists, Context, Derived, Pipeline,
};
use crate::domain::dish::Dish;
use crate::domain::errors::DomainError;

#[derive(Debug, Default)]
pub struct DishDraft {
    name: Option<String>,
    description: Option<String>,
    price: Option<u64>,
    image_url: Option<String>,
}

impl DishDraft {
    pub fn into_dish(self, id: String) -> Result<Dish, DomainError> {
        Ok(Dish {
            id,
            name: derived_field(self.name, "name")?,
            description: derived_field(self.description, "description")?,
            price: derived_field(self.price, "price")?,
            image_url: derived_field(self.image_url, "image_url")?,
        })
    }
}

type DishDerived = Derived<DishDraft>;

pub fn has_name(ctx: &Context<'_, Dish>, mut d: DishDerived) -> Result<DishDerived, DomainError> {
    let name = ctx
        .payload
        .present_str("name")
        .ok_or_else(|| DomainError::bad_request("Missing name"))?;
    d.draft.name = Some(name.to_string());
    Ok(d)
}

pub fn has_description(
    ctx: &Context<'_, Dish>,
    mut d: DishDerived,
) -> Result<DishDerived, DomainError> {
    let description = ctx
        .payload
        .present_str("description")
        .ok_or_else(|| DomainError::bad_request("Missing description"))?;
    d.draft.description = Some(description.to_string());
    Ok(d)
}

pub fn has_price(ctx: &Context<'_, Dish>, d: DishDerived) -> Result<DishDerived, DomainError> {
    match ctx.payload.present("price") {
        Some(_) => Ok(d),
        None => Err(DomainError::bad_request("Dish must include a price")),
    }
}

/// Numeric strings such as `"3"` are accepted here and stored as integers;
/// [`price_is_number`] is the stricter check used on update.
pub fn has_valid_price(
    ctx: &Context<'_, Dish>,
    mut d: DishDerived,
) -> Result<DishDerived, DomainError> {
    let price = match ctx.payload.get("price") {
        Some(Value::Number(n)) => positive_integer(n),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .and_then(|n| positive_integer(&n)),
        _ => None,
    };
    match price {
        Some(price) => {
            d.draft.price = Some(price);
            Ok(d)
        }
        None => Err(DomainError::bad_request(
            "Dish must have a price that is an integer greater than 0",
        )),
    }
}

pub fn price_is_number(
    ctx: &Context<'_, Dish>,
    d: DishDerived,
) -> Result<DishDerived, DomainError> {
    match ctx.payload.get("price") {
        Some(Value::Number(_)) => Ok(d),
        _ => Err(DomainError::bad_request("Dish must have a price that is a number")),
    }
}

pub fn has_image_url(
    ctx: &Context<'_, Dish>,
    mut d: DishDerived,
) -> Result<DishDerived, DomainError> {
    let image_url = ctx
        .payload
        .present_str("image_url")
        .ok_or_else(|| DomainError::bad_request("Dish must include a image_url"))?;
    d.draft.image_url = Some(image_url.to_string());
    Ok(d)
}

/// The validation chains for every dish operation.
pub struct DishPipelines {
    pub create: Pipeline<Dish, DishDraft>,
    pub read: Pipeline<Dish, DishDraft>,
    pub update: Pipeline<Dish, DishDraft>,
}

impl DishPipelines {
    pub fn new() -> Self {
        DishPipelines {
            create: Pipeline::new("create dish")
                .step("has_name", has_name)
                .step("has_description", has_description)
                .step("has_price", has_price)
                .step("has_valid_price", has_valid_price)
                .step("has_image_url", has_image_url),
            read: Pipeline::new("read dish").step("dish_exists", resource_exists),
            update: Pipeline::new("update dish")
                .step("dish_exists", resource_exists)
                .step("has_name", has_name)
                .step("has_description", has_description)
                .step("has_price", has_price)
                .step("has_valid_price", has_valid_price)
                .step("price_is_number", price_is_number)
                .step("has_image_url", has_image_url)
                .step("match_id", match_id),
        }
    }
}

impl Default for DishPipelines {
    fn default() -> Self {
        Self::new()
    }
}
