use serde::Deserialize;

pub const ENTERPRISE_ID_QUERY: &str = r#"
query enterprise($slug: String!) {
  enterprise(slug: $slug) {
    id
  }
}
"#;

pub const CREATE_ORG_MUTATION: &str = r#"
mutation createEnterpriseOrganization($adminLogins: [String!]!, $billingEmail: String!, $enterpriseId: ID!, $login: String!, $profileName: String!) {
  createEnterpriseOrganization(input: {enterpriseId: $enterpriseId, adminLogins: $adminLogins, billingEmail: $billingEmail, login: $login, profileName: $profileName}) {
    organization {
      id
      login
      name
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
pub struct EnterpriseData {
    pub enterprise: Option<NodeId>,
}

#[derive(Debug, Deserialize)]
pub struct NodeId {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrgData {
    #[serde(rename = "createEnterpriseOrganization")]
    pub create_enterprise_organization: CreateOrgPayload,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrgPayload {
    pub organization: OrgNode,
}

#[derive(Debug, Deserialize)]
pub struct OrgNode {
    pub id: String,
    pub login: String,
    pub name: Option<String>,
}
