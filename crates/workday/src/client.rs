//! Operation-level client for the HR service.
//!
//! [`WorkdayClient`] is the seam the dialog layer depends on; the HTTP
//! implementation builds envelopes, posts them through a [`SoapTransport`],
//! and reads replies with the namespace-agnostic XML tree.

use async_trait::async_trait;
use chrono::Local;
use hrmate_core::config::WorkdayConfig;
use hrmate_core::{EmergencyContactSnapshot, EmployeeRecord};

use crate::envelope::{self, Credentials, EmergencyContactUpdate};
use crate::error::WorkdayError;
use crate::transport::{HttpTransport, SoapTransport};
use crate::xml::{fault_string, XmlNode};

const DEFAULT_POSITION_REPORT: &str = "CR_AWS_AGURU_DEFAULT_POSITION";
const WORK_EMAIL_REPORT: &str = "CR_AWS_WORK_EMAIL?format=simplexml";
const MISSING_DATA_REPORT: &str = "CR_AWS_MISSING_DATA_REPORT?format=simplexml";
const HOME_USAGE: &str = "HOME";

/// Everything one Get_Workers call yields about a worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerProfile {
    pub employee: EmployeeRecord,
    pub emergency_contact: Option<EmergencyContactSnapshot>,
}

#[async_trait]
pub trait WorkdayClient: Send + Sync {
    async fn worker_profile(&self, employee_id: &str) -> Result<WorkerProfile, WorkdayError>;
    async fn change_preferred_name(
        &self,
        employee_id: &str,
        country: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), WorkdayError>;
    async fn primary_position_id(&self, employee_id: &str) -> Result<String, WorkdayError>;
    async fn change_business_title(
        &self,
        employee_id: &str,
        position_wid: &str,
        business_title: &str,
    ) -> Result<(), WorkdayError>;
    async fn change_home_email(&self, employee_id: &str, email: &str)
        -> Result<(), WorkdayError>;
    async fn change_home_phone(
        &self,
        employee_id: &str,
        country_code_id: &str,
        phone_number: &str,
    ) -> Result<(), WorkdayError>;
    async fn change_emergency_contact(
        &self,
        employee_id: &str,
        update: &EmergencyContactUpdate,
    ) -> Result<(), WorkdayError>;
    async fn record_daily_location(
        &self,
        employee_id: &str,
        location_data: &str,
    ) -> Result<(), WorkdayError>;
    async fn employee_id_for_work_email(
        &self,
        email: &str,
    ) -> Result<Option<String>, WorkdayError>;
    async fn missing_data_flags(
        &self,
        employee_id: &str,
    ) -> Result<Vec<(String, String)>, WorkdayError>;
}

pub struct HttpWorkdayClient<T = HttpTransport> {
    transport: T,
    credentials: Credentials,
    version: String,
    hr_url: String,
    staffing_url: String,
    report_base: String,
}

impl HttpWorkdayClient<HttpTransport> {
    /// `http` is the process-wide client shared across outbound
    /// integrations.
    pub fn from_config(http: reqwest::Client, config: &WorkdayConfig) -> Self {
        Self::with_transport(HttpTransport::new(http), config)
    }
}

impl<T> HttpWorkdayClient<T>
where
    T: SoapTransport,
{
    pub fn with_transport(transport: T, config: &WorkdayConfig) -> Self {
        let base = config.base_url.trim_end_matches('/');
        let version = config.api_version.clone();
        Self {
            transport,
            credentials: Credentials {
                username: format!("{}@{}", config.username, config.tenant),
                password: config.password.clone(),
            },
            hr_url: format!("{base}/{}/Human_Resources/{version}?WSDL", config.tenant),
            staffing_url: format!("{base}/{}/Staffing/{version}?WSDL", config.tenant),
            report_base: format!("{base}/customreport2/{}/{}", config.tenant, config.report_owner),
            version,
        }
    }

    fn report_url(&self, report: &str) -> String {
        format!("{}/{report}", self.report_base)
    }

    async fn call(&self, url: &str, body: String) -> Result<XmlNode, WorkdayError> {
        let reply = self.transport.post_xml(url, body).await?;
        if reply.status == 200 {
            return XmlNode::parse(&reply.body);
        }
        match XmlNode::parse(&reply.body) {
            Ok(root) => match fault_string(&root) {
                Some(faultstring) => {
                    tracing::warn!(
                        event_name = "workday.fault",
                        url = %url,
                        faultstring = %faultstring,
                    );
                    Err(WorkdayError::Fault { faultstring: faultstring.to_owned() })
                }
                None => Err(WorkdayError::UnexpectedStatus { status: reply.status }),
            },
            Err(_) => Err(WorkdayError::UnexpectedStatus { status: reply.status }),
        }
    }
}

#[async_trait]
impl<T> WorkdayClient for HttpWorkdayClient<T>
where
    T: SoapTransport,
{
    async fn worker_profile(&self, employee_id: &str) -> Result<WorkerProfile, WorkdayError> {
        let body = envelope::get_workers(&self.credentials, &self.version, employee_id);
        let root = self.call(&self.hr_url, body).await?;

        let worker_data = root
            .descend(&["Body", "Get_Workers_Response", "Response_Data", "Worker", "Worker_Data"])
            .ok_or_else(|| WorkdayError::missing("Get_Workers_Response/.../Worker_Data"))?;
        let name_detail = worker_data
            .descend(&["Personal_Data", "Name_Data", "Preferred_Name_Data", "Name_Detail_Data"])
            .ok_or_else(|| WorkdayError::missing("Preferred_Name_Data/Name_Detail_Data"))?;

        let first_name = name_detail
            .child("First_Name")
            .map(|node| node.text().to_owned())
            .ok_or_else(|| WorkdayError::missing("Name_Detail_Data/First_Name"))?;
        let country = name_detail
            .child("Country_Reference")
            .and_then(|reference| {
                reference
                    .children_named("ID")
                    .find(|id| id.attribute("type") == Some("ISO_3166-1_Alpha-3_Code"))
            })
            .map(|id| id.text().to_owned())
            .ok_or_else(|| WorkdayError::missing("Country_Reference ISO_3166-1_Alpha-3_Code"))?;

        let emergency_contact = worker_data
            .child("Related_Person_Data")
            .and_then(|related| {
                related
                    .children_named("Related_Person")
                    .filter(|person| person.has_child("Emergency_Contact"))
                    .last()
            })
            .map(emergency_contact_snapshot);

        tracing::debug!(
            event_name = "workday.worker_profile_fetched",
            employee_id = %employee_id,
            country = %country,
            has_emergency_contact = emergency_contact.is_some(),
        );

        Ok(WorkerProfile {
            employee: EmployeeRecord {
                employee_id: employee_id.to_owned(),
                first_name,
                country,
            },
            emergency_contact,
        })
    }

    async fn change_preferred_name(
        &self,
        employee_id: &str,
        country: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), WorkdayError> {
        let body = envelope::change_preferred_name(
            &self.credentials,
            &self.version,
            employee_id,
            country,
            first_name,
            "",
            last_name,
        );
        self.call(&self.hr_url, body).await?;
        tracing::info!(event_name = "workday.preferred_name_changed", employee_id = %employee_id);
        Ok(())
    }

    async fn primary_position_id(&self, employee_id: &str) -> Result<String, WorkdayError> {
        let body = envelope::execute_report_for_employee(&self.credentials, employee_id);
        let root = self.call(&self.report_url(DEFAULT_POSITION_REPORT), body).await?;
        root.descend_text(&[
            "Body",
            "Report_Data",
            "Report_Entry",
            "Worker_Profile_Default_Position",
            "ID",
        ])
        .map(str::to_owned)
        .ok_or_else(|| WorkdayError::missing("Report_Entry/Worker_Profile_Default_Position/ID"))
    }

    async fn change_business_title(
        &self,
        employee_id: &str,
        position_wid: &str,
        business_title: &str,
    ) -> Result<(), WorkdayError> {
        let body = envelope::change_business_title(
            &self.credentials,
            &self.version,
            employee_id,
            position_wid,
            business_title,
            Local::now().date_naive(),
        );
        self.call(&self.hr_url, body).await?;
        tracing::info!(event_name = "workday.business_title_changed", employee_id = %employee_id);
        Ok(())
    }

    async fn change_home_email(
        &self,
        employee_id: &str,
        email: &str,
    ) -> Result<(), WorkdayError> {
        let body = envelope::change_home_email(
            &self.credentials,
            &self.version,
            employee_id,
            HOME_USAGE,
            email,
            Local::now().date_naive(),
        );
        self.call(&self.hr_url, body).await?;
        tracing::info!(event_name = "workday.home_email_changed", employee_id = %employee_id);
        Ok(())
    }

    async fn change_home_phone(
        &self,
        employee_id: &str,
        country_code_id: &str,
        phone_number: &str,
    ) -> Result<(), WorkdayError> {
        let body = envelope::change_home_phone(
            &self.credentials,
            &self.version,
            employee_id,
            HOME_USAGE,
            country_code_id,
            phone_number,
            Local::now().date_naive(),
        );
        self.call(&self.hr_url, body).await?;
        tracing::info!(event_name = "workday.home_phone_changed", employee_id = %employee_id);
        Ok(())
    }

    async fn change_emergency_contact(
        &self,
        employee_id: &str,
        update: &EmergencyContactUpdate,
    ) -> Result<(), WorkdayError> {
        let body = envelope::change_emergency_contacts(
            &self.credentials,
            &self.version,
            employee_id,
            update,
            Local::now().date_naive(),
        );
        self.call(&self.hr_url, body).await?;
        tracing::info!(
            event_name = "workday.emergency_contact_changed",
            employee_id = %employee_id,
        );
        Ok(())
    }

    async fn record_daily_location(
        &self,
        employee_id: &str,
        location_data: &str,
    ) -> Result<(), WorkdayError> {
        let body = envelope::edit_worker_additional_data(
            &self.credentials,
            &self.version,
            employee_id,
            location_data,
            Local::now().date_naive(),
        );
        self.call(&self.staffing_url, body).await?;
        tracing::info!(
            event_name = "workday.daily_location_recorded",
            employee_id = %employee_id,
            location_data = %location_data,
        );
        Ok(())
    }

    async fn employee_id_for_work_email(
        &self,
        email: &str,
    ) -> Result<Option<String>, WorkdayError> {
        let body = envelope::execute_report_for_work_email(&self.credentials, email);
        let root = self.call(&self.report_url(WORK_EMAIL_REPORT), body).await?;
        Ok(root
            .descend_text(&["Body", "Report_Data", "Report_Entry", "Employee_ID"])
            .filter(|id| !id.is_empty())
            .map(str::to_owned))
    }

    async fn missing_data_flags(
        &self,
        employee_id: &str,
    ) -> Result<Vec<(String, String)>, WorkdayError> {
        let body = envelope::execute_missing_data_report(&self.credentials, employee_id);
        let root = self.call(&self.report_url(MISSING_DATA_REPORT), body).await?;
        let entry = root
            .descend(&["Body", "Report_Data", "Report_Entry"])
            .ok_or_else(|| WorkdayError::missing("Report_Data/Report_Entry"))?;
        Ok(entry
            .children()
            .map(|child| (child.name().to_owned(), child.text().to_owned()))
            .collect())
    }
}

fn emergency_contact_snapshot(person: &XmlNode) -> EmergencyContactSnapshot {
    let personal = person.child("Personal_Data");
    let formatted_name = personal
        .and_then(|data| data.descend(&["Name_Data", "Preferred_Name_Data", "Name_Detail_Data"]))
        .and_then(|detail| detail.attribute("Formatted_Name"))
        .map(str::to_owned);

    let contact = personal.and_then(|data| data.child("Contact_Data"));
    let formatted_address = contact
        .and_then(|data| data.child("Address_Data"))
        .and_then(|address| address.attribute("Formatted_Address"))
        .map(str::to_owned);
    let phone = contact
        .and_then(|data| data.child("Phone_Data"))
        .and_then(|phone| phone.attribute("International_Formatted_Phone"))
        .map(str::to_owned);
    let email = contact
        .and_then(|data| data.child("Email_Address_Data"))
        .and_then(|data| data.child("Email_Address"))
        .map(|address| address.text().to_owned());

    EmergencyContactSnapshot { formatted_name, formatted_address, phone, email }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use hrmate_core::config::WorkdayConfig;
    use secrecy::SecretString;

    use super::{HttpWorkdayClient, WorkdayClient};
    use crate::error::WorkdayError;
    use crate::transport::{SoapReply, SoapTransport};

    struct FakeTransport {
        replies: Mutex<VecDeque<SoapReply>>,
        requests: Mutex<Vec<(String, String)>>,
    }

    impl FakeTransport {
        fn new(replies: Vec<SoapReply>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn ok(body: &str) -> Self {
            Self::new(vec![SoapReply { status: 200, body: body.to_owned() }])
        }

        fn requests(&self) -> Vec<(String, String)> {
            self.requests.lock().expect("request log").clone()
        }
    }

    #[async_trait]
    impl SoapTransport for FakeTransport {
        async fn post_xml(&self, url: &str, body: String) -> Result<SoapReply, WorkdayError> {
            self.requests
                .lock()
                .expect("request log")
                .push((url.to_owned(), body));
            Ok(self
                .replies
                .lock()
                .expect("canned replies")
                .pop_front()
                .expect("a canned reply for every request"))
        }
    }

    fn config() -> WorkdayConfig {
        WorkdayConfig {
            base_url: "https://wd2-impl-services1.myworkday.test/ccx/service/".to_owned(),
            tenant: "fisher1".to_owned(),
            username: "ISU_CHATBOT".to_owned(),
            password: SecretString::from("hunter2"),
            api_version: "v30.1".to_owned(),
            report_owner: "ISU_AWS_AGURU".to_owned(),
        }
    }

    fn client(transport: FakeTransport) -> HttpWorkdayClient<FakeTransport> {
        HttpWorkdayClient::with_transport(transport, &config())
    }

    const WORKERS_REPLY: &str = r#"
        <env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
          <env:Body>
            <wd:Get_Workers_Response xmlns:wd="urn:com.workday/bsvc">
              <wd:Response_Data>
                <wd:Worker>
                  <wd:Worker_Data>
                    <wd:Personal_Data>
                      <wd:Name_Data>
                        <wd:Preferred_Name_Data>
                          <wd:Name_Detail_Data wd:Formatted_Name="Priya Raman">
                            <wd:Country_Reference>
                              <wd:ID wd:type="WID">abc</wd:ID>
                              <wd:ID wd:type="ISO_3166-1_Alpha-3_Code">IND</wd:ID>
                            </wd:Country_Reference>
                            <wd:First_Name>Priya</wd:First_Name>
                            <wd:Last_Name>Raman</wd:Last_Name>
                          </wd:Name_Detail_Data>
                        </wd:Preferred_Name_Data>
                      </wd:Name_Data>
                    </wd:Personal_Data>
                    <wd:Related_Person_Data>
                      <wd:Related_Person>
                        <wd:Dependent/>
                        <wd:Personal_Data>
                          <wd:Name_Data>
                            <wd:Preferred_Name_Data>
                              <wd:Name_Detail_Data wd:Formatted_Name="Anil Raman"/>
                            </wd:Preferred_Name_Data>
                          </wd:Name_Data>
                        </wd:Personal_Data>
                      </wd:Related_Person>
                      <wd:Related_Person>
                        <wd:Emergency_Contact>
                          <wd:Emergency_Contact_Reference/>
                        </wd:Emergency_Contact>
                        <wd:Personal_Data>
                          <wd:Name_Data>
                            <wd:Preferred_Name_Data>
                              <wd:Name_Detail_Data wd:Formatted_Name="Meera Raman"/>
                            </wd:Preferred_Name_Data>
                          </wd:Name_Data>
                          <wd:Contact_Data>
                            <wd:Address_Data wd:Formatted_Address="12 Lake View Road&#10;Bengaluru 560001&#10;India"/>
                            <wd:Phone_Data wd:International_Formatted_Phone="+91 98450 12345"/>
                            <wd:Email_Address_Data>
                              <wd:Email_Address>meera@example.org</wd:Email_Address>
                            </wd:Email_Address_Data>
                          </wd:Contact_Data>
                        </wd:Personal_Data>
                      </wd:Related_Person>
                    </wd:Related_Person_Data>
                  </wd:Worker_Data>
                </wd:Worker>
              </wd:Response_Data>
            </wd:Get_Workers_Response>
          </env:Body>
        </env:Envelope>"#;

    #[tokio::test]
    async fn worker_profile_reads_name_country_and_emergency_contact() {
        let workday = client(FakeTransport::ok(WORKERS_REPLY));

        let profile = workday.worker_profile("21072").await.expect("profile");

        assert_eq!(profile.employee.employee_id, "21072");
        assert_eq!(profile.employee.first_name, "Priya");
        assert_eq!(profile.employee.country, "IND");

        let contact = profile.emergency_contact.expect("emergency contact on file");
        assert_eq!(contact.name(), "Meera Raman");
        assert_eq!(contact.address(), "12 Lake View Road, Bengaluru 560001, India");
        assert_eq!(contact.phone(), "+91 98450 12345");
        assert_eq!(contact.email(), "meera@example.org");

        let requests = workday.transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].0,
            "https://wd2-impl-services1.myworkday.test/ccx/service/fisher1/Human_Resources/v30.1?WSDL"
        );
        assert!(requests[0].1.contains("ISU_CHATBOT@fisher1"));
        assert!(requests[0].1.contains("<wsse:Password"));
    }

    #[tokio::test]
    async fn soap_faults_surface_the_faultstring() {
        let transport = FakeTransport::new(vec![SoapReply {
            status: 500,
            body: r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
                       <SOAP-ENV:Body>
                         <SOAP-ENV:Fault>
                           <faultcode>SOAP-ENV:Client.validationError</faultcode>
                           <faultstring>Validation error occurred. Invalid Worker ID.</faultstring>
                         </SOAP-ENV:Fault>
                       </SOAP-ENV:Body>
                     </SOAP-ENV:Envelope>"#
                .to_owned(),
        }]);
        let workday = client(transport);

        let error = workday
            .change_home_email("21072", "new@example.org")
            .await
            .expect_err("fault should fail the call");
        assert_eq!(
            error.faultstring(),
            Some("Validation error occurred. Invalid Worker ID.")
        );
    }

    #[tokio::test]
    async fn unparseable_error_bodies_become_unexpected_status() {
        let transport = FakeTransport::new(vec![SoapReply {
            status: 503,
            body: "Service Temporarily Unavailable".to_owned(),
        }]);
        let workday = client(transport);

        let error = workday
            .primary_position_id("21072")
            .await
            .expect_err("status should fail the call");
        assert!(matches!(error, WorkdayError::UnexpectedStatus { status: 503 }));
    }

    #[tokio::test]
    async fn missing_data_flags_keep_report_order() {
        let workday = client(FakeTransport::ok(
            r#"<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
                 <env:Body>
                   <wd:Report_Data xmlns:wd="urn:com.workday/bsvc">
                     <wd:Report_Entry>
                       <wd:Employee_ID>21072</wd:Employee_ID>
                       <wd:Check_Home_Email>1</wd:Check_Home_Email>
                       <wd:Check_Home_Phone>0</wd:Check_Home_Phone>
                     </wd:Report_Entry>
                   </wd:Report_Data>
                 </env:Body>
               </env:Envelope>"#,
        ));

        let flags = workday.missing_data_flags("21072").await.expect("flags");
        assert_eq!(
            flags,
            vec![
                ("Employee_ID".to_owned(), "21072".to_owned()),
                ("Check_Home_Email".to_owned(), "1".to_owned()),
                ("Check_Home_Phone".to_owned(), "0".to_owned()),
            ]
        );

        let requests = workday.transport.requests();
        assert_eq!(
            requests[0].0,
            "https://wd2-impl-services1.myworkday.test/ccx/service/customreport2/fisher1/ISU_AWS_AGURU/CR_AWS_MISSING_DATA_REPORT?format=simplexml"
        );
    }

    #[tokio::test]
    async fn unknown_work_email_resolves_to_none() {
        let workday = client(FakeTransport::ok(
            r#"<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
                 <env:Body>
                   <wd:Report_Data xmlns:wd="urn:com.workday/bsvc"/>
                 </env:Body>
               </env:Envelope>"#,
        ));

        let resolved = workday
            .employee_id_for_work_email("nobody@example.org")
            .await
            .expect("report call");
        assert_eq!(resolved, None);
    }

    #[tokio::test]
    async fn daily_location_posts_to_the_staffing_endpoint() {
        let workday = client(FakeTransport::ok(
            r#"<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
                 <env:Body>
                   <wd:Edit_Worker_Additional_Data_Event_Response xmlns:wd="urn:com.workday/bsvc"/>
                 </env:Body>
               </env:Envelope>"#,
        ));

        workday
            .record_daily_location("21072", "Working from home")
            .await
            .expect("location recorded");

        let requests = workday.transport.requests();
        assert_eq!(
            requests[0].0,
            "https://wd2-impl-services1.myworkday.test/ccx/service/fisher1/Staffing/v30.1?WSDL"
        );
        assert!(requests[0].1.contains("Working from home"));
    }
}
