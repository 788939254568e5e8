// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2025 Oxide Computer Company

//! Structured serialization of [`BuildInfo`].
//!
//! Diagnostics endpoints and `version` subcommands publish the record under
//! fixed key names.  Those names live in [`WIRE_FIELDS`] and nowhere else:
//! the `Serialize`, `Deserialize` and `JsonSchema` impls below all walk that
//! table.

use std::fmt;

use schemars::gen::SchemaGenerator;
use schemars::schema::InstanceType;
use schemars::schema::Metadata;
use schemars::schema::Schema;
use schemars::schema::SchemaObject;
use schemars::JsonSchema;
use serde::de::IgnoredAny;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeStruct;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::info::BuildInfo;
use crate::info::Field;

/// Field to external key, in serialization order.
pub const WIRE_FIELDS: [(Field, &str); 6] = [
    (Field::Version, "version"),
    (Field::GitRevision, "revision"),
    (Field::RuntimeVersion, "golang_version"),
    (Field::BuildStatus, "status"),
    (Field::GitTag, "tag"),
    (Field::Vendor, "vendor"),
];

const WIRE_NAMES: [&str; 6] = [
    WIRE_FIELDS[0].1,
    WIRE_FIELDS[1].1,
    WIRE_FIELDS[2].1,
    WIRE_FIELDS[3].1,
    WIRE_FIELDS[4].1,
    WIRE_FIELDS[5].1,
];

pub fn field_for_wire_name(name: &str) -> Option<Field> {
    WIRE_FIELDS.iter().find(|(_, n)| *n == name).map(|(f, _)| *f)
}

impl Serialize for BuildInfo {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut s =
            serializer.serialize_struct("BuildInfo", WIRE_FIELDS.len())?;
        for (field, name) in WIRE_FIELDS {
            s.serialize_field(name, self.get(field))?;
        }
        s.end()
    }
}

struct BuildInfoVisitor;

impl<'de> Visitor<'de> for BuildInfoVisitor {
    type Value = BuildInfo;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a build information object")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut map: A,
    ) -> Result<BuildInfo, A::Error> {
        // Keys that are absent keep their sentinel.
        let mut info = BuildInfo::default();
        while let Some(key) = map.next_key::<String>()? {
            match field_for_wire_name(&key) {
                Some(field) => info.set(field, map.next_value::<String>()?),
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(info)
    }
}

impl<'de> Deserialize<'de> for BuildInfo {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        deserializer.deserialize_struct(
            "BuildInfo",
            &WIRE_NAMES,
            BuildInfoVisitor,
        )
    }
}

impl JsonSchema for BuildInfo {
    fn schema_name() -> String {
        "BuildInfo".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        let mut schema = SchemaObject {
            instance_type: Some(InstanceType::Object.into()),
            metadata: Some(Box::new(Metadata {
                description: Some(
                    "Version information describing how a binary was built."
                        .to_string(),
                ),
                ..Default::default()
            })),
            ..Default::default()
        };
        let object = schema.object();
        for (_, name) in WIRE_FIELDS {
            // Not `required`: a missing key deserializes to its sentinel.
            object
                .properties
                .insert(name.to_string(), gen.subschema_for::<String>());
        }
        Schema::Object(schema)
    }
}
