//! User registration form

use super::FormSchema;
use crate::error::FormError;
use crate::schema::{ChoiceOption, Constraint, FieldKind, FieldSpec, FileHandle, Schema};
use crate::validator::ValidRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const FAVORITE_FOODS: [&str; 6] = ["Pizza", "Burger", "Sushi", "Pasta", "Salad", "Ice Cream"];
pub const MAX_FAVORITE_FOODS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::str::FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(()),
        }
    }
}

/// An accepted registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistration {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub bio: String,
    pub gender: Gender,
    /// Non-empty, at most [`MAX_FAVORITE_FOODS`] entries
    pub favorite_food: BTreeSet<String>,
    pub country: String,
    pub profile_picture: FileHandle,
}

/// Marker type for the registration form
#[derive(Debug, Clone, Copy)]
pub struct RegistrationForm;

impl FormSchema for RegistrationForm {
    type Output = UserRegistration;

    const TITLE: &'static str = "User Registration";

    fn schema() -> Schema {
        Schema::new(vec![
            FieldSpec::new("name", "Name", FieldKind::Text).required("Name is required"),
            FieldSpec::new("email", "Email", FieldKind::Email)
                .required("email is required")
                .constraint(Constraint::EmailFormat, "Invalid email address"),
            FieldSpec::new("password", "Password", FieldKind::Secret).constraint(
                Constraint::MinLength(8),
                "Password must be at least 8 characters",
            ),
            FieldSpec::new("bio", "Bio", FieldKind::MultilineText)
                .required("Bio must be at least 8 characters")
                .constraint(Constraint::MaxLength(8), "Bio must not exceed 8 characters"),
            FieldSpec::new("gender", "Gender", FieldKind::SingleChoice)
                .required("Gender is required")
                .constraint(
                    Constraint::OneOf(vec!["male".into(), "female".into()]),
                    "Gender is required",
                )
                .options(vec![
                    ChoiceOption::new("male", "Male"),
                    ChoiceOption::new("female", "Female"),
                ]),
            FieldSpec::new("favoriteFood", "Favorite Food", FieldKind::MultiChoice)
                .required("Please select at least one favorite food.")
                .constraint(
                    Constraint::MaxSelected(MAX_FAVORITE_FOODS),
                    "Please select at least three favorite food maximum",
                )
                .options(
                    FAVORITE_FOODS
                        .iter()
                        .map(|food| ChoiceOption::new(food, food))
                        .collect(),
                ),
            FieldSpec::new("country", "Country", FieldKind::SingleChoice)
                .required("Please select a country")
                .options(vec![
                    ChoiceOption::new("us", "United States"),
                    ChoiceOption::new("uk", "United Kingdom"),
                    ChoiceOption::new("ca", "Canada"),
                ]),
            FieldSpec::new("profilePicture", "Profile Picture", FieldKind::FileReference)
                .required("Profile picture is required"),
        ])
    }

    fn extract(record: &ValidRecord) -> Result<Self::Output, FormError> {
        let gender = record.text("gender")?;
        Ok(UserRegistration {
            name: record.text("name")?.to_string(),
            email: record.text("email")?.to_string(),
            password: record.text("password")?.to_string(),
            bio: record.text("bio")?.to_string(),
            gender: gender.parse().map_err(|_| FormError::UnexpectedValue {
                field: "gender".to_string(),
                value: gender.to_string(),
            })?,
            favorite_food: record.choices("favoriteFood")?.clone(),
            country: record.text("country")?.to_string(),
            profile_picture: record.file("profilePicture")?.clone(),
        })
    }
}
