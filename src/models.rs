//! Record types compiled into the `struct-schema` binary
//!
//! `Student` is the canonical example. The enrollment types exercise every
//! shape: nested records, sequences of records, mappings, optional fields,
//! and serialization aliases that match the serde renames.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::reflect::{RecordDescriptor, Reflect, TypeDescriptor};

const PACKAGE: &str = "school";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Student {
    pub name: String,
    pub age: isize,
    pub classes: Vec<String>,
}

impl Reflect for Student {
    fn descriptor() -> TypeDescriptor {
        RecordDescriptor::of::<Self>("Student")
            .package(PACKAGE)
            .field::<String>("Name")
            .field::<isize>("Age")
            .field::<Vec<String>>("Classes")
            .into()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "street")]
    pub street: String,
    #[serde(rename = "city")]
    pub city: String,
    #[serde(rename = "postal_code")]
    pub postal_code: String,
}

impl Reflect for Address {
    fn descriptor() -> TypeDescriptor {
        RecordDescriptor::of::<Self>("Address")
            .package(PACKAGE)
            .tagged_field::<String>("Street", "street")
            .tagged_field::<String>("City", "city")
            .tagged_field::<String>("PostalCode", "postal_code")
            .into()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    #[serde(rename = "name")]
    pub name: String,
    #[serde(rename = "email")]
    pub email: String,
    #[serde(rename = "office")]
    pub office: Address,
}

impl Reflect for Instructor {
    fn descriptor() -> TypeDescriptor {
        RecordDescriptor::of::<Self>("Instructor")
            .package(PACKAGE)
            .tagged_field::<String>("Name", "name")
            .tagged_field::<String>("Email", "email")
            .tagged_field::<Address>("Office", "office")
            .into()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "code")]
    pub code: String,
    #[serde(rename = "title")]
    pub title: String,
    #[serde(rename = "credits")]
    pub credits: u8,
    #[serde(rename = "instructor")]
    pub instructor: Instructor,
}

impl Reflect for Course {
    fn descriptor() -> TypeDescriptor {
        RecordDescriptor::of::<Self>("Course")
            .package(PACKAGE)
            .tagged_field::<String>("Code", "code")
            .tagged_field::<String>("Title", "title")
            .tagged_field::<u8>("Credits", "credits")
            .tagged_field::<Instructor>("Instructor", "instructor")
            .into()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    #[serde(rename = "student")]
    pub student: Student,
    #[serde(rename = "home")]
    pub home: Address,
    #[serde(rename = "courses")]
    pub courses: Vec<Course>,
    #[serde(rename = "grades")]
    pub grades: HashMap<String, f64>,
    #[serde(rename = "advisor")]
    pub advisor: Option<Instructor>,
    #[serde(rename = "tags")]
    pub tags: BTreeSet<String>,
    #[serde(rename = "year")]
    pub year: u16,
}

impl Reflect for Enrollment {
    fn descriptor() -> TypeDescriptor {
        RecordDescriptor::of::<Self>("Enrollment")
            .package(PACKAGE)
            .tagged_field::<Student>("Student", "student")
            .tagged_field::<Address>("Home", "home")
            .tagged_field::<Vec<Course>>("Courses", "courses")
            .tagged_field::<HashMap<String, f64>>("Grades", "grades")
            .tagged_field::<Option<Instructor>>("Advisor", "advisor")
            .tagged_field::<BTreeSet<String>>("Tags", "tags")
            .tagged_field::<u16>("Year", "year")
            .into()
    }
}
