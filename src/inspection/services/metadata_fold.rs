use crate::inspection::domain::{ArtifactMetaData, CompositeComponentModel, OriginKey, SeverityCounts};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// MetadataFold folds composite components into one record per origin key
///
/// The first BOM entry that declares an origin owns its record: counts, policy
/// status and link all come from that one component version. Later entries
/// declaring the same origin are ignored. Counts are the fresh tally of this
/// pass, never a sum over passes. Every origin of a component version receives
/// the same counts, policy status and link.
pub struct MetadataFold;

impl MetadataFold {
    pub fn fold(components: &[(CompositeComponentModel, SeverityCounts)]) -> BTreeMap<OriginKey, ArtifactMetaData> {
        let mut records: BTreeMap<OriginKey, ArtifactMetaData> = BTreeMap::new();

        for (model, counts) in components {
            let Some(component_version) = &model.component_version else {
                continue;
            };

            for origin in &model.origins {
                let key = origin.key();
                if let Entry::Vacant(slot) = records.entry(key.clone()) {
                    let mut record = ArtifactMetaData::new(
                        key,
                        model.bom_component.policy_status,
                        &component_version.url,
                    );
                    record.set_counts(*counts);
                    slot.insert(record);
                }
            }
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspection::domain::{BomComponent, ComponentOrigin, ComponentVersion, PolicyStatus};

    fn model(cv: &str, policy: PolicyStatus, origins: &[(&str, &str)]) -> CompositeComponentModel {
        CompositeComponentModel::new(
            BomComponent::new("c", "1", cv, policy),
            ComponentVersion::new(cv, "1"),
            origins
                .iter()
                .map(|(forge, id)| ComponentOrigin::new(forge, id))
                .collect(),
        )
    }

    #[test]
    fn test_fan_out_to_every_origin() {
        let counts = SeverityCounts { high: 2, medium: 1, low: 0 };
        let records = MetadataFold::fold(&[(
            model(
                "https://bom/cv/1",
                PolicyStatus::InViolation,
                &[("npmjs", "a/1.0.0"), ("bower", "a/1.0.0")],
            ),
            counts,
        )]);

        assert_eq!(records.len(), 2);
        let npm = &records[&OriginKey::new("npmjs", "a/1.0.0")];
        let bower = &records[&OriginKey::new("bower", "a/1.0.0")];
        assert_eq!(npm.counts(), bower.counts());
        assert_eq!(npm.policy_status(), bower.policy_status());
        assert_eq!(npm.component_version_link(), bower.component_version_link());
    }

    #[test]
    fn test_placeholders_contribute_nothing() {
        let placeholder = CompositeComponentModel::placeholder(BomComponent::new(
            "c",
            "1",
            "https://bom/cv/9",
            PolicyStatus::NotInViolation,
        ));
        let records = MetadataFold::fold(&[(placeholder, SeverityCounts::default())]);
        assert!(records.is_empty());
    }

    #[test]
    fn test_first_entry_owns_shared_origin_record() {
        let records = MetadataFold::fold(&[
            (
                model("https://bom/cv/1", PolicyStatus::InViolation, &[("pypi", "x/1")]),
                SeverityCounts { high: 5, medium: 0, low: 0 },
            ),
            (
                model("https://bom/cv/2", PolicyStatus::NotInViolation, &[("pypi", "x/1")]),
                SeverityCounts { high: 0, medium: 0, low: 1 },
            ),
        ]);
        let record = &records[&OriginKey::new("pypi", "x/1")];
        assert_eq!(record.policy_status(), PolicyStatus::InViolation);
        assert_eq!(record.component_version_link(), "https://bom/cv/1");
        assert_eq!(record.counts(), SeverityCounts { high: 5, medium: 0, low: 0 });
    }

    #[test]
    fn test_fold_twice_is_identical() {
        let input = vec![(
            model("https://bom/cv/1", PolicyStatus::NotInViolation, &[("npmjs", "a/1")]),
            SeverityCounts { high: 0, medium: 3, low: 1 },
        )];
        assert_eq!(MetadataFold::fold(&input), MetadataFold::fold(&input));
    }
}
