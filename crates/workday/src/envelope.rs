//! SOAP request envelopes for the HR service.
//!
//! Requests authenticate with a WS-Security UsernameToken header; every value
//! interpolated into a template is XML-escaped first.

use chrono::NaiveDate;
use quick_xml::escape::escape;
use secrecy::{ExposeSecret, SecretString};

const WSSE_NS: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";
const PASSWORD_TEXT_TYPE: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-username-token-profile-1.0#PasswordText";
const ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const WD_NS: &str = "urn:com.workday/bsvc";
const CUSTOM_NS: &str = "urn:com.workday/tenants/super/data/custom";

/// Integration-system credentials placed in the WS-Security header. The
/// username already carries the tenant suffix (`user@tenant`).
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Fields for replacing a worker's primary emergency contact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmergencyContactUpdate {
    pub country: String,
    pub relation_type_id: String,
    pub first_name: String,
    pub last_name: String,
    pub address_line: String,
    pub city: String,
    pub region_id: String,
    pub postal_code: String,
    pub phone_number: String,
    pub email: String,
}

fn security_header(credentials: &Credentials) -> String {
    format!(
        r#"<env:Header>
        <wsse:Security env:mustUnderstand="1">
            <wsse:UsernameToken>
                <wsse:Username>{username}</wsse:Username>
                <wsse:Password Type="{password_type}">{password}</wsse:Password>
            </wsse:UsernameToken>
        </wsse:Security>
    </env:Header>"#,
        username = escape(&credentials.username),
        password_type = PASSWORD_TEXT_TYPE,
        password = escape(credentials.password.expose_secret()),
    )
}

fn envelope(credentials: &Credentials, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<env:Envelope xmlns:env="{env_ns}" xmlns:wsse="{wsse_ns}">
    {header}
    <env:Body>
        {body}
    </env:Body>
</env:Envelope>"#,
        env_ns = ENV_NS,
        wsse_ns = WSSE_NS,
        header = security_header(credentials),
        body = body,
    )
}

pub fn get_workers(credentials: &Credentials, version: &str, employee_id: &str) -> String {
    let body = format!(
        r#"<wd:Get_Workers_Request xmlns:wd="{wd_ns}" wd:version="{version}">
            <wd:Request_References>
                <wd:Worker_Reference>
                    <wd:ID wd:type="Employee_ID">{employee_id}</wd:ID>
                </wd:Worker_Reference>
            </wd:Request_References>
            <wd:Response_Filter>
                <wd:Page>1</wd:Page>
                <wd:Count>1</wd:Count>
            </wd:Response_Filter>
            <wd:Response_Group>
                <wd:Include_Personal_Information>true</wd:Include_Personal_Information>
                <wd:Include_Related_Persons>true</wd:Include_Related_Persons>
            </wd:Response_Group>
        </wd:Get_Workers_Request>"#,
        wd_ns = WD_NS,
        version = escape(version),
        employee_id = escape(employee_id),
    );
    envelope(credentials, &body)
}

pub fn change_preferred_name(
    credentials: &Credentials,
    version: &str,
    employee_id: &str,
    country: &str,
    first_name: &str,
    middle_name: &str,
    last_name: &str,
) -> String {
    let body = format!(
        r#"<wd:Change_Preferred_Name_Request xmlns:wd="{wd_ns}" wd:version="{version}">
            <wd:Business_Process_Parameters>
                <wd:Auto_Complete>true</wd:Auto_Complete>
                <wd:Run_Now>true</wd:Run_Now>
            </wd:Business_Process_Parameters>
            <wd:Change_Preferred_Name_Data>
                <wd:Person_Reference>
                    <wd:ID wd:type="Employee_ID">{employee_id}</wd:ID>
                </wd:Person_Reference>
                <wd:Name_Data>
                    <wd:Country_Reference>
                        <wd:ID wd:type="ISO_3166-1_Alpha-3_Code">{country}</wd:ID>
                    </wd:Country_Reference>
                    <wd:First_Name>{first_name}</wd:First_Name>
                    <wd:Middle_Name>{middle_name}</wd:Middle_Name>
                    <wd:Last_Name>{last_name}</wd:Last_Name>
                </wd:Name_Data>
            </wd:Change_Preferred_Name_Data>
        </wd:Change_Preferred_Name_Request>"#,
        wd_ns = WD_NS,
        version = escape(version),
        employee_id = escape(employee_id),
        country = escape(country),
        first_name = escape(first_name),
        middle_name = escape(middle_name),
        last_name = escape(last_name),
    );
    envelope(credentials, &body)
}

pub fn change_business_title(
    credentials: &Credentials,
    version: &str,
    employee_id: &str,
    position_wid: &str,
    business_title: &str,
    effective_date: NaiveDate,
) -> String {
    let body = format!(
        r#"<wd:Change_Business_Title_Request xmlns:wd="{wd_ns}" wd:version="{version}">
            <wd:Business_Process_Parameters>
                <wd:Auto_Complete>true</wd:Auto_Complete>
                <wd:Run_Now>true</wd:Run_Now>
            </wd:Business_Process_Parameters>
            <wd:Change_Business_Title_Business_Process_Data>
                <wd:Worker_Reference>
                    <wd:ID wd:type="Employee_ID">{employee_id}</wd:ID>
                </wd:Worker_Reference>
                <wd:Job_Reference>
                    <wd:ID wd:type="WID">{position_wid}</wd:ID>
                </wd:Job_Reference>
                <wd:Change_Business_Title_Data>
                    <wd:Event_Effective_Date>{effective_date}</wd:Event_Effective_Date>
                    <wd:Proposed_Business_Title>{business_title}</wd:Proposed_Business_Title>
                </wd:Change_Business_Title_Data>
            </wd:Change_Business_Title_Business_Process_Data>
        </wd:Change_Business_Title_Request>"#,
        wd_ns = WD_NS,
        version = escape(version),
        employee_id = escape(employee_id),
        position_wid = escape(position_wid),
        business_title = escape(business_title),
        effective_date = effective_date,
    );
    envelope(credentials, &body)
}

pub fn change_home_email(
    credentials: &Credentials,
    version: &str,
    employee_id: &str,
    usage: &str,
    email: &str,
    effective_date: NaiveDate,
) -> String {
    let body = format!(
        r#"<wd:Change_Home_Contact_Information_Request xmlns:wd="{wd_ns}" wd:version="{version}">
            <wd:Business_Process_Parameters>
                <wd:Auto_Complete>true</wd:Auto_Complete>
                <wd:Run_Now>true</wd:Run_Now>
            </wd:Business_Process_Parameters>
            <wd:Change_Home_Contact_Information_Data>
                <wd:Person_Reference>
                    <wd:ID wd:type="Employee_ID">{employee_id}</wd:ID>
                </wd:Person_Reference>
                <wd:Event_Effective_Date>{effective_date}</wd:Event_Effective_Date>
                <wd:Person_Contact_Information_Data>
                    <wd:Person_Email_Information_Data wd:Replace_All="true">
                        <wd:Email_Information_Data wd:Delete="false">
                            <wd:Email_Data>
                                <wd:Email_Address>{email}</wd:Email_Address>
                            </wd:Email_Data>
                            <wd:Usage_Data wd:Public="true">
                                <wd:Type_Data wd:Primary="true">
                                    <wd:Type_Reference>
                                        <wd:ID wd:type="Communication_Usage_Type_ID">{usage}</wd:ID>
                                    </wd:Type_Reference>
                                </wd:Type_Data>
                            </wd:Usage_Data>
                        </wd:Email_Information_Data>
                    </wd:Person_Email_Information_Data>
                </wd:Person_Contact_Information_Data>
            </wd:Change_Home_Contact_Information_Data>
        </wd:Change_Home_Contact_Information_Request>"#,
        wd_ns = WD_NS,
        version = escape(version),
        employee_id = escape(employee_id),
        usage = escape(usage),
        email = escape(email),
        effective_date = effective_date,
    );
    envelope(credentials, &body)
}

pub fn change_home_phone(
    credentials: &Credentials,
    version: &str,
    employee_id: &str,
    usage: &str,
    country_code_id: &str,
    phone_number: &str,
    effective_date: NaiveDate,
) -> String {
    let body = format!(
        r#"<wd:Change_Home_Contact_Information_Request xmlns:wd="{wd_ns}" wd:version="{version}">
            <wd:Business_Process_Parameters>
                <wd:Auto_Complete>true</wd:Auto_Complete>
                <wd:Run_Now>true</wd:Run_Now>
            </wd:Business_Process_Parameters>
            <wd:Change_Home_Contact_Information_Data>
                <wd:Person_Reference>
                    <wd:ID wd:type="Employee_ID">{employee_id}</wd:ID>
                </wd:Person_Reference>
                <wd:Event_Effective_Date>{effective_date}</wd:Event_Effective_Date>
                <wd:Person_Contact_Information_Data>
                    <wd:Person_Phone_Information_Data wd:Replace_All="true">
                        <wd:Phone_Information_Data wd:Delete="false">
                            <wd:Phone_Data>
                                <wd:Device_Type_Reference>
                                    <wd:ID wd:type="Phone_Device_Type_ID">Mobile</wd:ID>
                                </wd:Device_Type_Reference>
                                <wd:Country_Code_Reference>
                                    <wd:ID wd:type="Country_Phone_Code_ID">{country_code_id}</wd:ID>
                                </wd:Country_Code_Reference>
                                <wd:Complete_Phone_Number>{phone_number}</wd:Complete_Phone_Number>
                            </wd:Phone_Data>
                            <wd:Usage_Data wd:Public="true">
                                <wd:Type_Data wd:Primary="true">
                                    <wd:Type_Reference>
                                        <wd:ID wd:type="Communication_Usage_Type_ID">{usage}</wd:ID>
                                    </wd:Type_Reference>
                                </wd:Type_Data>
                            </wd:Usage_Data>
                        </wd:Phone_Information_Data>
                    </wd:Person_Phone_Information_Data>
                </wd:Person_Contact_Information_Data>
            </wd:Change_Home_Contact_Information_Data>
        </wd:Change_Home_Contact_Information_Request>"#,
        wd_ns = WD_NS,
        version = escape(version),
        employee_id = escape(employee_id),
        usage = escape(usage),
        country_code_id = escape(country_code_id),
        phone_number = escape(phone_number),
        effective_date = effective_date,
    );
    envelope(credentials, &body)
}

pub fn change_emergency_contacts(
    credentials: &Credentials,
    version: &str,
    employee_id: &str,
    update: &EmergencyContactUpdate,
    last_modified: NaiveDate,
) -> String {
    let body = format!(
        r#"<wd:Change_Emergency_Contacts_Request xmlns:wd="{wd_ns}" wd:version="{version}">
            <wd:Business_Process_Parameters>
                <wd:Auto_Complete>true</wd:Auto_Complete>
                <wd:Run_Now>true</wd:Run_Now>
            </wd:Business_Process_Parameters>
            <wd:Change_Emergency_Contacts_Data>
                <wd:Person_Reference>
                    <wd:ID wd:type="Employee_ID">{employee_id}</wd:ID>
                </wd:Person_Reference>
                <wd:Replace_All>true</wd:Replace_All>
                <wd:Emergency_Contacts_Reference_Data>
                    <wd:Delete>false</wd:Delete>
                    <wd:Emergency_Contact_Data>
                        <wd:Primary>true</wd:Primary>
                        <wd:Priority>1</wd:Priority>
                        <wd:Related_Person_Relationship_Reference>
                            <wd:ID wd:type="Related_Person_Relationship_ID">{relation_type_id}</wd:ID>
                        </wd:Related_Person_Relationship_Reference>
                        <wd:Emergency_Contact_Personal_Information_Data>
                            <wd:Person_Name_Data>
                                <wd:Legal_Name_Data>
                                    <wd:Name_Detail_Data>
                                        <wd:Country_Reference>
                                            <wd:ID wd:type="ISO_3166-1_Alpha-3_Code">{country}</wd:ID>
                                        </wd:Country_Reference>
                                        <wd:First_Name>{first_name}</wd:First_Name>
                                        <wd:Last_Name>{last_name}</wd:Last_Name>
                                    </wd:Name_Detail_Data>
                                </wd:Legal_Name_Data>
                                <wd:Preferred_Name_Data>
                                    <wd:Name_Detail_Data>
                                        <wd:Country_Reference>
                                            <wd:ID wd:type="ISO_3166-1_Alpha-3_Code">{country}</wd:ID>
                                        </wd:Country_Reference>
                                        <wd:First_Name>{first_name}</wd:First_Name>
                                        <wd:Last_Name>{last_name}</wd:Last_Name>
                                    </wd:Name_Detail_Data>
                                </wd:Preferred_Name_Data>
                            </wd:Person_Name_Data>
                            <wd:Contact_Information_Data>
                                <wd:Address_Data wd:Delete="false" wd:Do_Not_Replace_All="true">
                                    <wd:Country_Reference>
                                        <wd:ID wd:type="ISO_3166-1_Alpha-3_Code">{country}</wd:ID>
                                    </wd:Country_Reference>
                                    <wd:Last_Modified>{last_modified}</wd:Last_Modified>
                                    <wd:Address_Line_Data wd:Type="ADDRESS_LINE_1">{address_line}</wd:Address_Line_Data>
                                    <wd:Municipality>{city}</wd:Municipality>
                                    <wd:Country_Region_Reference>
                                        <wd:ID wd:type="Country_Region_ID">{region_id}</wd:ID>
                                    </wd:Country_Region_Reference>
                                    <wd:Postal_Code>{postal_code}</wd:Postal_Code>
                                    <wd:Usage_Data wd:Public="false">
                                        <wd:Type_Data wd:Primary="true">
                                            <wd:Type_Reference>
                                                <wd:ID wd:type="Communication_Usage_Type_ID">HOME</wd:ID>
                                            </wd:Type_Reference>
                                        </wd:Type_Data>
                                    </wd:Usage_Data>
                                </wd:Address_Data>
                                <wd:Phone_Data wd:Delete="false" wd:Do_Not_Replace_All="true">
                                    <wd:Country_ISO_Code>{country}</wd:Country_ISO_Code>
                                    <wd:Phone_Number>{phone_number}</wd:Phone_Number>
                                    <wd:Phone_Device_Type_Reference>
                                        <wd:ID wd:type="Phone_Device_Type_ID">Mobile</wd:ID>
                                    </wd:Phone_Device_Type_Reference>
                                    <wd:Usage_Data wd:Public="true">
                                        <wd:Type_Data wd:Primary="true">
                                            <wd:Type_Reference>
                                                <wd:ID wd:type="Communication_Usage_Type_ID">HOME</wd:ID>
                                            </wd:Type_Reference>
                                        </wd:Type_Data>
                                    </wd:Usage_Data>
                                </wd:Phone_Data>
                                <wd:Email_Address_Data wd:Delete="false" wd:Do_Not_Replace_All="true">
                                    <wd:Email_Address>{email}</wd:Email_Address>
                                    <wd:Usage_Data wd:Public="true">
                                        <wd:Type_Data wd:Primary="true">
                                            <wd:Type_Reference>
                                                <wd:ID wd:type="Communication_Usage_Type_ID">HOME</wd:ID>
                                            </wd:Type_Reference>
                                        </wd:Type_Data>
                                    </wd:Usage_Data>
                                </wd:Email_Address_Data>
                            </wd:Contact_Information_Data>
                        </wd:Emergency_Contact_Personal_Information_Data>
                    </wd:Emergency_Contact_Data>
                </wd:Emergency_Contacts_Reference_Data>
            </wd:Change_Emergency_Contacts_Data>
        </wd:Change_Emergency_Contacts_Request>"#,
        wd_ns = WD_NS,
        version = escape(version),
        employee_id = escape(employee_id),
        relation_type_id = escape(&update.relation_type_id),
        country = escape(&update.country),
        first_name = escape(&update.first_name),
        last_name = escape(&update.last_name),
        address_line = escape(&update.address_line),
        city = escape(&update.city),
        region_id = escape(&update.region_id),
        postal_code = escape(&update.postal_code),
        phone_number = escape(&update.phone_number),
        email = escape(&update.email),
        last_modified = last_modified,
    );
    envelope(credentials, &body)
}

pub fn edit_worker_additional_data(
    credentials: &Credentials,
    version: &str,
    employee_id: &str,
    location_data: &str,
    effective_date: NaiveDate,
) -> String {
    let body = format!(
        r#"<wd:Edit_Worker_Additional_Data_Request xmlns:wd="{wd_ns}" xmlns:cus="{custom_ns}" wd:version="{version}">
            <wd:Business_Process_Parameters>
                <wd:Auto_Complete>true</wd:Auto_Complete>
                <wd:Run_Now>true</wd:Run_Now>
            </wd:Business_Process_Parameters>
            <wd:Worker_Custom_Object_Data>
                <wd:Effective_Date>{effective_date}</wd:Effective_Date>
                <wd:Worker_Reference>
                    <wd:ID wd:type="Employee_ID">{employee_id}</wd:ID>
                </wd:Worker_Reference>
                <wd:Business_Object_Additional_Data>
                    <cus:dailylocationtracker>
                        <cus:locationdata>{location_data}</cus:locationdata>
                    </cus:dailylocationtracker>
                </wd:Business_Object_Additional_Data>
            </wd:Worker_Custom_Object_Data>
        </wd:Edit_Worker_Additional_Data_Request>"#,
        wd_ns = WD_NS,
        custom_ns = CUSTOM_NS,
        version = escape(version),
        employee_id = escape(employee_id),
        location_data = escape(location_data),
        effective_date = effective_date,
    );
    envelope(credentials, &body)
}

pub fn execute_report_for_employee(credentials: &Credentials, employee_id: &str) -> String {
    let body = format!(
        r#"<wd:Execute_Report xmlns:wd="{wd_ns}">
            <wd:Report_Parameters>
                <wd:Employee>
                    <wd:ID wd:type="Employee_ID">{employee_id}</wd:ID>
                </wd:Employee>
            </wd:Report_Parameters>
        </wd:Execute_Report>"#,
        wd_ns = WD_NS,
        employee_id = escape(employee_id),
    );
    envelope(credentials, &body)
}

pub fn execute_report_for_work_email(credentials: &Credentials, email: &str) -> String {
    let body = format!(
        r#"<wd:Execute_Report xmlns:wd="{wd_ns}">
            <wd:Report_Parameters>
                <wd:primaryWorkEmail>{email}</wd:primaryWorkEmail>
            </wd:Report_Parameters>
        </wd:Execute_Report>"#,
        wd_ns = WD_NS,
        email = escape(email),
    );
    envelope(credentials, &body)
}

pub fn execute_missing_data_report(credentials: &Credentials, employee_id: &str) -> String {
    // The missing-data report definition takes its prompt inside a nested
    // Report_Parameters block.
    let body = format!(
        r#"<wd:Execute_Report xmlns:wd="{wd_ns}">
            <wd:Report_Parameters>
                <wd:Report_Parameters>
                    <wd:Employee>
                        <wd:ID wd:type="Employee_ID">{employee_id}</wd:ID>
                    </wd:Employee>
                </wd:Report_Parameters>
            </wd:Report_Parameters>
        </wd:Execute_Report>"#,
        wd_ns = WD_NS,
        employee_id = escape(employee_id),
    );
    envelope(credentials, &body)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use secrecy::SecretString;

    use super::{
        change_business_title, change_emergency_contacts, change_home_phone, get_workers,
        Credentials, EmergencyContactUpdate,
    };

    fn credentials() -> Credentials {
        Credentials {
            username: "ISU_HRMATE@gms".to_owned(),
            password: SecretString::from("hunter2"),
        }
    }

    #[test]
    fn envelopes_carry_the_username_token() {
        let body = get_workers(&credentials(), "v34.1", "21072");

        assert!(body.contains("<wsse:Username>ISU_HRMATE@gms</wsse:Username>"));
        assert!(body.contains("PasswordText"));
        assert!(body.contains(r#"<wd:ID wd:type="Employee_ID">21072</wd:ID>"#));
        assert!(body.contains("<wd:Include_Related_Persons>true</wd:Include_Related_Persons>"));
        assert!(body.contains(r#"wd:version="v34.1""#));
    }

    #[test]
    fn interpolated_values_are_xml_escaped() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date");
        let body = change_business_title(
            &credentials(),
            "v34.1",
            "21072",
            "abc123wid",
            "R&D Lead <Platform>",
            date,
        );

        assert!(body.contains("R&amp;D Lead &lt;Platform&gt;"));
        assert!(!body.contains("R&D Lead <Platform>"));
        assert!(body.contains("<wd:Event_Effective_Date>2026-03-02</wd:Event_Effective_Date>"));
    }

    #[test]
    fn phone_updates_split_the_country_code_reference() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date");
        let body =
            change_home_phone(&credentials(), "v34.1", "21072", "HOME", "USA_1", "5551234567", date);

        assert!(body.contains(r#"<wd:ID wd:type="Country_Phone_Code_ID">USA_1</wd:ID>"#));
        assert!(body.contains("<wd:Complete_Phone_Number>5551234567</wd:Complete_Phone_Number>"));
        assert!(body.contains(r#"<wd:ID wd:type="Phone_Device_Type_ID">Mobile</wd:ID>"#));
        assert!(body.contains(r#"<wd:ID wd:type="Communication_Usage_Type_ID">HOME</wd:ID>"#));
    }

    #[test]
    fn emergency_contact_replaces_the_primary_contact() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date");
        let update = EmergencyContactUpdate {
            country: "USA".to_owned(),
            relation_type_id: "620.3".to_owned(),
            first_name: "Jordan".to_owned(),
            last_name: "Reyes".to_owned(),
            address_line: "42 Sunrise Lane".to_owned(),
            city: "San Jose".to_owned(),
            region_id: "USA-CA".to_owned(),
            postal_code: "95112".to_owned(),
            phone_number: "5551234567".to_owned(),
            email: "jordan.reyes@example.com".to_owned(),
        };
        let body = change_emergency_contacts(&credentials(), "v34.1", "21072", &update, date);

        assert!(body.contains("<wd:Replace_All>true</wd:Replace_All>"));
        assert!(body.contains("<wd:Primary>true</wd:Primary>"));
        assert!(body.contains("<wd:Priority>1</wd:Priority>"));
        assert!(body.contains(r#"<wd:ID wd:type="Related_Person_Relationship_ID">620.3</wd:ID>"#));
        assert!(body.contains(r#"<wd:ID wd:type="Country_Region_ID">USA-CA</wd:ID>"#));
        // The contact name goes out as both legal and preferred name.
        assert_eq!(body.matches("<wd:First_Name>Jordan</wd:First_Name>").count(), 2);
    }
}
