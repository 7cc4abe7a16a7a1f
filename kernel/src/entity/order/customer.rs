use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln, References};

#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct Customer {
    first_name: FirstName,
    last_name: LastName,
    address: Address,
    city: City,
    state: State,
    zip: Zip,
}

impl Customer {
    pub fn new(
        first_name: FirstName,
        last_name: LastName,
        address: Address,
        city: City,
        state: State,
        zip: Zip,
    ) -> Self {
        Self {
            first_name,
            last_name,
            address,
            city,
            state,
            zip,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct FirstName(String);

impl FirstName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct LastName(String);

impl LastName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct City(String);

impl City {
    pub fn new(city: impl Into<String>) -> Self {
        Self(city.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct State(String);

impl State {
    pub fn new(state: impl Into<String>) -> Self {
        Self(state.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Zip(String);

impl Zip {
    pub fn new(zip: impl Into<String>) -> Self {
        Self(zip.into())
    }
}
