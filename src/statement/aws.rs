use {
    super::Statement,
    crate::{condition::ConditionValues, BuilderError},
};

/// Shortcuts for the global `aws:` condition keys, available on statements for every service.
///
/// Each takes an optional operator name; when omitted, the key's documented default applies.
impl Statement {
    /// Filter by the service that made a request on the principal's behalf.
    pub fn if_aws_called_via<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:CalledVia", values, operator)
    }

    /// Filter by the first service in the `aws:CalledVia` chain.
    pub fn if_aws_called_via_first<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:CalledViaFirst", values, operator)
    }

    pub fn if_aws_called_via_last<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:CalledViaLast", values, operator)
    }

    /// Filter by the date and time of the request. Defaults to `DateLessThanEquals`.
    pub fn if_aws_current_time<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:CurrentTime", values, operator)
    }

    /// Filter by the request time as epoch seconds or a date. Defaults to `DateLessThanEquals`.
    pub fn if_aws_epoch_time<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:EpochTime", values, operator)
    }

    /// Filter by seconds since the principal authenticated with MFA. Defaults to `NumericLessThan`.
    pub fn if_aws_multi_factor_auth_age<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:MultiFactorAuthAge", values, operator)
    }

    pub fn if_aws_multi_factor_auth_present(&mut self, value: bool) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:MultiFactorAuthPresent", value, None)
    }

    pub fn if_aws_principal_account<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:PrincipalAccount", values, operator)
    }

    pub fn if_aws_principal_arn<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:PrincipalArn", values, operator)
    }

    pub fn if_aws_principal_org_id<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:PrincipalOrgID", values, operator)
    }

    /// Filter by the principal's AWS Organizations path. The key is multivalued.
    pub fn if_aws_principal_org_paths<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:PrincipalOrgPaths", values, operator)
    }

    /// Filter by a tag attached to the calling principal.
    pub fn if_aws_principal_tag<V: Into<ConditionValues>>(
        &mut self,
        tag_key: &str,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_tagged_condition("aws:PrincipalTag/${TagKey}", tag_key, values, operator)
    }

    pub fn if_aws_principal_type<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:PrincipalType", values, operator)
    }

    /// Filter by the HTTP referer of the request.
    pub fn if_aws_referer<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:referer", values, operator)
    }

    /// Filter by a tag passed in the request.
    pub fn if_aws_request_tag<V: Into<ConditionValues>>(
        &mut self,
        tag_key: &str,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_tagged_condition("aws:RequestTag/${TagKey}", tag_key, values, operator)
    }

    pub fn if_aws_requested_region<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:RequestedRegion", values, operator)
    }

    /// Filter by a tag attached to the resource being accessed.
    pub fn if_aws_resource_tag<V: Into<ConditionValues>>(
        &mut self,
        tag_key: &str,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_tagged_condition("aws:ResourceTag/${TagKey}", tag_key, values, operator)
    }

    pub fn if_aws_secure_transport(&mut self, value: bool) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:SecureTransport", value, None)
    }

    pub fn if_aws_source_account<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:SourceAccount", values, operator)
    }

    pub fn if_aws_source_arn<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:SourceArn", values, operator)
    }

    /// Filter by the requester's IP address or CIDR range. Defaults to `IpAddress`.
    pub fn if_aws_source_ip<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:SourceIp", values, operator)
    }

    pub fn if_aws_source_vpc<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:SourceVpc", values, operator)
    }

    pub fn if_aws_source_vpce<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:SourceVpce", values, operator)
    }

    /// Filter by the tag keys passed in the request.
    pub fn if_aws_tag_keys<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:TagKeys", values, operator)
    }

    /// Filter by when the temporary credentials were issued. Defaults to `DateGreaterThanEquals`.
    pub fn if_aws_token_issue_time<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:TokenIssueTime", values, operator)
    }

    pub fn if_aws_user_agent<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:UserAgent", values, operator)
    }

    pub fn if_aws_userid<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:userid", values, operator)
    }

    pub fn if_aws_username<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:username", values, operator)
    }

    pub fn if_aws_via_aws_service(&mut self, value: bool) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:ViaAWSService", value, None)
    }

    /// Filter by the requester's IP address inside a VPC. Defaults to `IpAddress`.
    pub fn if_aws_vpc_source_ip<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.with_condition("aws:VpcSourceIp", values, operator)
    }
}
