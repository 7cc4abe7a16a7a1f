use error_stack::Report;

use kernel::prelude::entity::{
    Address, City, Customer, FirstName, LastName, LessonId, OrderItem, OrderQuantity, State, Zip,
};
use kernel::{InvalidField, KernelError};

#[derive(Debug, Default)]
pub struct CreateOrderDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub items: Option<Vec<OrderItemDto>>,
}

#[derive(Debug, Default)]
pub struct OrderItemDto {
    pub lesson_id: Option<String>,
    pub quantity: Option<i64>,
}

fn required(name: &str, value: Option<String>, invalid: &mut Vec<InvalidField>) -> String {
    match value.map(|value| value.trim().to_string()) {
        Some(value) if !value.is_empty() => value,
        _ => {
            invalid.push(InvalidField::new(name));
            String::new()
        }
    }
}

impl CreateOrderDto {
    /// Checks presence of every customer field and item, without touching the store.
    ///
    /// Missing input is a [`KernelError::Validation`] naming each offending field.
    /// A lesson id that cannot exist is a [`KernelError::Capacity`] failure, the
    /// same as a lesson that is absent from the store.
    pub fn validate(self) -> error_stack::Result<(Customer, Vec<OrderItem>), KernelError> {
        let mut invalid = Vec::new();
        let first_name = required("firstName", self.first_name, &mut invalid);
        let last_name = required("lastName", self.last_name, &mut invalid);
        let address = required("address", self.address, &mut invalid);
        let city = required("city", self.city, &mut invalid);
        let state = required("state", self.state, &mut invalid);
        let zip = required("zip", self.zip, &mut invalid);

        let items = self.items.unwrap_or_default();
        if items.is_empty() {
            invalid.push(InvalidField::new("items"));
        }
        let items = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let lesson_id = required(
                    &format!("items[{index}].lessonId"),
                    item.lesson_id,
                    &mut invalid,
                );
                let quantity = item.quantity.and_then(OrderQuantity::try_new);
                if quantity.is_none() {
                    invalid.push(InvalidField::new(format!("items[{index}].quantity")));
                }
                (lesson_id, quantity)
            })
            .collect::<Vec<_>>();

        if !invalid.is_empty() {
            let report = invalid.into_iter().fold(
                Report::new(KernelError::Validation),
                |report, field| report.attach_printable(field),
            );
            return Err(report);
        }

        let items = items
            .into_iter()
            .filter_map(|(lesson_id, quantity)| quantity.map(|quantity| (lesson_id, quantity)))
            .map(|(lesson_id, quantity)| {
                LessonId::parse(&lesson_id)
                    .map(|id| OrderItem::new(id, quantity))
                    .ok_or_else(|| {
                        Report::new(KernelError::Capacity)
                            .attach_printable(format!("Lesson `{lesson_id}` does not exist"))
                    })
            })
            .collect::<error_stack::Result<Vec<OrderItem>, KernelError>>()?;

        let customer = Customer::new(
            FirstName::new(first_name),
            LastName::new(last_name),
            Address::new(address),
            City::new(city),
            State::new(state),
            Zip::new(zip),
        );
        Ok((customer, items))
    }
}
