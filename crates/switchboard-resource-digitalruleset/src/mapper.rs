use switchboard_resource_api::{
    ConfigNode,
    Fields,
    FromConfigNode,
    NodeBuilder,
    ResourceResult,
    ToConfigNode,
};

use crate::types::*;

impl FromConfigNode for DigitalRuleSet {
    fn from_node_at(node: &ConfigNode, path: &str) -> ResourceResult<Self> {
        Fields::read(node, path, |fields| {
            Ok(DigitalRuleSet {
                id: None,
                name: Some(fields.required_string("name")?),
                version: None,
                contact_list: fields
                    .string("contact_list_id")?
                    .map(|id| EntityRef { id }),
                rules: fields.list("rules", build_rule)?,
            })
        })
    }
}

fn build_rule(fields: Fields<'_>) -> ResourceResult<DigitalRule> {
    Ok(DigitalRule {
        name: fields.string("name")?,
        order: fields.int("order")?,
        category: fields.string("category")?,
        conditions: fields.list("conditions", build_condition)?,
        actions: fields.list("actions", build_action)?,
    })
}

fn build_condition(fields: Fields<'_>) -> ResourceResult<DigitalCondition> {
    Ok(DigitalCondition {
        inverted: fields.bool("inverted")?,
        contact_column_condition_settings: fields.block(
            "contact_column_condition_settings",
            |s| {
                Ok(ContactColumnConditionSettings {
                    column_name: s.string("column_name")?,
                    operator: s.string("operator")?,
                    value: s.string("value")?,
                    value_type: s.string("value_type")?,
                })
            },
        )?,
        contact_address_condition_settings: fields.block(
            "contact_address_condition_settings",
            |s| {
                Ok(ContactAddressConditionSettings {
                    operator: s.string("operator")?,
                    value: s.string("value")?,
                })
            },
        )?,
        last_attempt_by_column_condition_settings: fields.block(
            "last_attempt_by_column_condition_settings",
            |s| {
                Ok(LastAttemptByColumnConditionSettings {
                    email_column_name: s.string("email_column_name")?,
                    sms_column_name: s.string("sms_column_name")?,
                    operator: s.string("operator")?,
                    value: s.string("value")?,
                })
            },
        )?,
        last_result_by_column_condition_settings: fields.block(
            "last_result_by_column_condition_settings",
            |s| {
                Ok(LastResultByColumnConditionSettings {
                    email_column_name: s.string("email_column_name")?,
                    email_wrapup_codes: s.string_set("email_wrapup_codes")?,
                    sms_column_name: s.string("sms_column_name")?,
                    sms_wrapup_codes: s.string_set("sms_wrapup_codes")?,
                })
            },
        )?,
        data_action_condition_settings: fields.block("data_action_condition_settings", |s| {
            Ok(DataActionConditionSettings {
                data_action_id: s.string("data_action_id")?,
                contact_id_field: s.string("contact_id_field")?,
                data_not_found_resolution: s.bool("data_not_found_resolution")?,
                predicates: s.list("predicates", |p| {
                    Ok(DataActionPredicate {
                        output_field: p.string("output_field")?,
                        output_operator: p.string("output_operator")?,
                        comparison_value: p.string("comparison_value")?,
                        inverted: p.bool("inverted")?,
                        output_field_missing_resolution: p
                            .bool("output_field_missing_resolution")?,
                    })
                })?,
                contact_column_to_data_action_field_mappings: s.list(
                    "contact_column_to_data_action_field_mappings",
                    |m| {
                        Ok(ColumnFieldMapping {
                            contact_column_name: m.string("contact_column_name")?,
                            data_action_field: m.string("data_action_field")?,
                        })
                    },
                )?,
            })
        })?,
    })
}

fn build_action(fields: Fields<'_>) -> ResourceResult<DigitalAction> {
    Ok(DigitalAction {
        update_contact_column_action_settings: fields.block(
            "update_contact_column_action_settings",
            |s| {
                Ok(UpdateContactColumnActionSettings {
                    properties: s.string_map("properties")?,
                    update_option: s.string("update_option")?,
                })
            },
        )?,
        do_not_send_action_settings: fields
            .block("do_not_send_action_settings", |_| Ok(MarkerSettings {}))?,
        append_to_dnc_action_settings: fields.block("append_to_dnc_action_settings", |s| {
            Ok(AppendToDncActionSettings {
                expire: s.bool("expire")?,
                expiration_duration: s.string("expiration_duration")?,
                list_type: s.string("list_type")?,
            })
        })?,
        mark_contact_uncontactable_action_settings: fields.block(
            "mark_contact_uncontactable_action_settings",
            |s| {
                Ok(MarkContactUncontactableActionSettings {
                    media_types: s.string_set("media_types")?,
                })
            },
        )?,
        mark_contact_address_uncontactable_action_settings: fields.block(
            "mark_contact_address_uncontactable_action_settings",
            |_| Ok(MarkerSettings {}),
        )?,
        set_content_template_action_settings: fields.block(
            "set_content_template_action_settings",
            |s| {
                Ok(SetContentTemplateActionSettings {
                    sms_content_template_id: s.string("sms_content_template_id")?,
                    email_content_template_id: s.string("email_content_template_id")?,
                })
            },
        )?,
        set_sms_phone_number_action_settings: fields.block(
            "set_sms_phone_number_action_settings",
            |s| {
                Ok(SetSmsPhoneNumberActionSettings {
                    sender_sms_phone_number: s.string("sender_sms_phone_number")?,
                })
            },
        )?,
    })
}

impl ToConfigNode for DigitalRuleSet {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("name", self.name.as_deref())
            .string(
                "contact_list_id",
                self.contact_list.as_ref().map(|list| list.id.as_str()),
            )
            .list("rules", self.rules.as_deref())
            .build()
    }
}

impl ToConfigNode for DigitalRule {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("name", self.name.as_deref())
            .int("order", self.order)
            .string("category", self.category.as_deref())
            .list("conditions", self.conditions.as_deref())
            .list("actions", self.actions.as_deref())
            .build()
    }
}

impl ToConfigNode for DigitalCondition {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .bool("inverted", self.inverted)
            .block(
                "contact_column_condition_settings",
                self.contact_column_condition_settings.as_ref(),
            )
            .block(
                "contact_address_condition_settings",
                self.contact_address_condition_settings.as_ref(),
            )
            .block(
                "last_attempt_by_column_condition_settings",
                self.last_attempt_by_column_condition_settings.as_ref(),
            )
            .block(
                "last_result_by_column_condition_settings",
                self.last_result_by_column_condition_settings.as_ref(),
            )
            .block(
                "data_action_condition_settings",
                self.data_action_condition_settings.as_ref(),
            )
            .build()
    }
}

impl ToConfigNode for ContactColumnConditionSettings {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("column_name", self.column_name.as_deref())
            .string("operator", self.operator.as_deref())
            .string("value", self.value.as_deref())
            .string("value_type", self.value_type.as_deref())
            .build()
    }
}

impl ToConfigNode for ContactAddressConditionSettings {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("operator", self.operator.as_deref())
            .string("value", self.value.as_deref())
            .build()
    }
}

impl ToConfigNode for LastAttemptByColumnConditionSettings {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("email_column_name", self.email_column_name.as_deref())
            .string("sms_column_name", self.sms_column_name.as_deref())
            .string("operator", self.operator.as_deref())
            .string("value", self.value.as_deref())
            .build()
    }
}

impl ToConfigNode for LastResultByColumnConditionSettings {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("email_column_name", self.email_column_name.as_deref())
            .string_set("email_wrapup_codes", self.email_wrapup_codes.as_deref())
            .string("sms_column_name", self.sms_column_name.as_deref())
            .string_set("sms_wrapup_codes", self.sms_wrapup_codes.as_deref())
            .build()
    }
}

impl ToConfigNode for DataActionConditionSettings {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("data_action_id", self.data_action_id.as_deref())
            .string("contact_id_field", self.contact_id_field.as_deref())
            .bool("data_not_found_resolution", self.data_not_found_resolution)
            .list("predicates", self.predicates.as_deref())
            .list(
                "contact_column_to_data_action_field_mappings",
                self.contact_column_to_data_action_field_mappings.as_deref(),
            )
            .build()
    }
}

impl ToConfigNode for DataActionPredicate {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("output_field", self.output_field.as_deref())
            .string("output_operator", self.output_operator.as_deref())
            .string("comparison_value", self.comparison_value.as_deref())
            .bool("inverted", self.inverted)
            .bool(
                "output_field_missing_resolution",
                self.output_field_missing_resolution,
            )
            .build()
    }
}

impl ToConfigNode for ColumnFieldMapping {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("contact_column_name", self.contact_column_name.as_deref())
            .string("data_action_field", self.data_action_field.as_deref())
            .build()
    }
}

impl ToConfigNode for DigitalAction {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .block(
                "update_contact_column_action_settings",
                self.update_contact_column_action_settings.as_ref(),
            )
            .block(
                "do_not_send_action_settings",
                self.do_not_send_action_settings.as_ref(),
            )
            .block(
                "append_to_dnc_action_settings",
                self.append_to_dnc_action_settings.as_ref(),
            )
            .block(
                "mark_contact_uncontactable_action_settings",
                self.mark_contact_uncontactable_action_settings.as_ref(),
            )
            .block(
                "mark_contact_address_uncontactable_action_settings",
                self.mark_contact_address_uncontactable_action_settings.as_ref(),
            )
            .block(
                "set_content_template_action_settings",
                self.set_content_template_action_settings.as_ref(),
            )
            .block(
                "set_sms_phone_number_action_settings",
                self.set_sms_phone_number_action_settings.as_ref(),
            )
            .build()
    }
}

impl ToConfigNode for UpdateContactColumnActionSettings {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string_map("properties", self.properties.as_ref())
            .string("update_option", self.update_option.as_deref())
            .build()
    }
}

impl ToConfigNode for MarkerSettings {
    fn to_node(&self) -> ConfigNode {
        ConfigNode::empty_mapping()
    }
}

impl ToConfigNode for AppendToDncActionSettings {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .bool("expire", self.expire)
            .string("expiration_duration", self.expiration_duration.as_deref())
            .string("list_type", self.list_type.as_deref())
            .build()
    }
}

impl ToConfigNode for MarkContactUncontactableActionSettings {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string_set("media_types", self.media_types.as_deref())
            .build()
    }
}

impl ToConfigNode for SetContentTemplateActionSettings {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("sms_content_template_id", self.sms_content_template_id.as_deref())
            .string(
                "email_content_template_id",
                self.email_content_template_id.as_deref(),
            )
            .build()
    }
}

impl ToConfigNode for SetSmsPhoneNumberActionSettings {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("sender_sms_phone_number", self.sender_sms_phone_number.as_deref())
            .build()
    }
}
