//! Wire types for the outbound digital rule set API

use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};
use switchboard_resource_api::RemoteObject;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalRuleSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_list: Option<EntityRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<DigitalRule>>,
}

impl RemoteObject for DigitalRuleSet {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn version(&self) -> Option<String> {
        self.version.map(|v| v.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<DigitalCondition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<DigitalAction>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_column_condition_settings: Option<ContactColumnConditionSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_address_condition_settings: Option<ContactAddressConditionSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_attempt_by_column_condition_settings: Option<LastAttemptByColumnConditionSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_result_by_column_condition_settings: Option<LastResultByColumnConditionSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_action_condition_settings: Option<DataActionConditionSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactColumnConditionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactAddressConditionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastAttemptByColumnConditionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_column_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_column_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastResultByColumnConditionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_column_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_wrapup_codes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_column_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_wrapup_codes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataActionConditionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_action_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_not_found_resolution: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicates: Option<Vec<DataActionPredicate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_column_to_data_action_field_mappings: Option<Vec<ColumnFieldMapping>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataActionPredicate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_field_missing_resolution: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnFieldMapping {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_column_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_action_field: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_contact_column_action_settings: Option<UpdateContactColumnActionSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_not_send_action_settings: Option<MarkerSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub append_to_dnc_action_settings: Option<AppendToDncActionSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_contact_uncontactable_action_settings: Option<MarkContactUncontactableActionSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_contact_address_uncontactable_action_settings: Option<MarkerSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_content_template_action_settings: Option<SetContentTemplateActionSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_sms_phone_number_action_settings: Option<SetSmsPhoneNumberActionSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactColumnActionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_option: Option<String>,
}

/// Settings object with no fields; its presence selects the action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerSettings {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendToDncActionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkContactUncontactableActionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_types: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetContentTemplateActionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_content_template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_content_template_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSmsPhoneNumberActionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_sms_phone_number: Option<String>,
}
