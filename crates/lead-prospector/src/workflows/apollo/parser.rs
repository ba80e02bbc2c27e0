use super::mapping::industry_for_normalized;
use super::normalizer::{normalize_email, normalize_label};
use crate::workflows::prospecting::{CompanySize, Industry};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One contact row after cleanup, before dedup and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApolloContact {
    pub(crate) name: String,
    pub(crate) title: String,
    pub(crate) company: String,
    pub(crate) email: Option<String>,
    pub(crate) phone: Option<String>,
    pub(crate) location: String,
    pub(crate) industry: Option<Industry>,
    pub(crate) company_size: Option<CompanySize>,
}

pub(crate) fn parse_contacts<R: Read>(reader: R) -> Result<Vec<ApolloContact>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut contacts = Vec::new();

    for record in csv_reader.deserialize::<ApolloContactRow>() {
        contacts.push(record?.into_contact());
    }

    Ok(contacts)
}

#[derive(Debug, Deserialize)]
struct ApolloContactRow {
    #[serde(rename = "First Name", default, deserialize_with = "empty_string_as_none")]
    first_name: Option<String>,
    #[serde(rename = "Last Name", default, deserialize_with = "empty_string_as_none")]
    last_name: Option<String>,
    #[serde(rename = "Title", default, deserialize_with = "empty_string_as_none")]
    title: Option<String>,
    #[serde(rename = "Company", default, deserialize_with = "empty_string_as_none")]
    company: Option<String>,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(rename = "Phone", default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(rename = "City", default, deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    #[serde(rename = "State", default, deserialize_with = "empty_string_as_none")]
    state: Option<String>,
    #[serde(rename = "Industry", default, deserialize_with = "empty_string_as_none")]
    industry: Option<String>,
    #[serde(rename = "# Employees", default, deserialize_with = "empty_string_as_none")]
    employees: Option<String>,
}

impl ApolloContactRow {
    fn into_contact(self) -> ApolloContact {
        let name = join_present(&[self.first_name.as_deref(), self.last_name.as_deref()], " ");
        let location = join_present(&[self.city.as_deref(), self.state.as_deref()], ", ");
        let industry = self
            .industry
            .as_deref()
            .and_then(|raw| industry_for_normalized(&normalize_label(raw)));
        let company_size = self
            .employees
            .as_deref()
            .and_then(parse_employee_count)
            .map(CompanySize::for_employees);

        ApolloContact {
            name,
            title: self.title.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            email: self.email.as_deref().map(normalize_email),
            phone: self.phone,
            location,
            industry,
            company_size,
        }
    }
}

fn join_present(parts: &[Option<&str>], separator: &str) -> String {
    parts
        .iter()
        .flatten()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Reads "1,200", "150" or a "51-200" band (lower bound).
fn parse_employee_count(value: &str) -> Option<u32> {
    let digits: String = value
        .trim()
        .chars()
        .filter(|ch| *ch != ',' && *ch != '.')
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
pub(crate) fn parse_employee_count_for_tests(value: &str) -> Option<u32> {
    parse_employee_count(value)
}
