//! Namespace-agnostic XML tree used to read SOAP responses.
//!
//! The HR service is inconsistent about prefixes (`env:` vs `SOAP-ENV:` on
//! fault envelopes, `wd:` on payloads), so every lookup here matches on local
//! names only.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::WorkdayError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
    text: String,
}

impl XmlNode {
    /// Parses a document and returns its root element.
    pub fn parse(xml: &str) -> Result<XmlNode, WorkdayError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => stack.push(Self::from_start(&start)?),
                Event::Empty(start) => {
                    let node = Self::from_start(&start)?;
                    Self::attach(&mut stack, &mut root, node);
                }
                Event::Text(text) => {
                    if let Some(open) = stack.last_mut() {
                        open.text.push_str(&text.unescape()?);
                    }
                }
                Event::CData(data) => {
                    if let Some(open) = stack.last_mut() {
                        open.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::End(_) => {
                    let node = match stack.pop() {
                        Some(node) => node,
                        None => return Err(WorkdayError::missing("matching start tag")),
                    };
                    Self::attach(&mut stack, &mut root, node);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        root.ok_or_else(|| WorkdayError::missing("root element"))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<XmlNode, WorkdayError> {
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            attributes.push((
                local_part(attribute.key.as_ref()),
                attribute.unescape_value()?.into_owned(),
            ));
        }
        Ok(XmlNode {
            name: local_part(start.name().as_ref()),
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(node);
        } else if root.is_none() {
            *root = Some(node);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn children(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter()
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    /// Follows a chain of child element names from this node.
    pub fn descend(&self, path: &[&str]) -> Option<&XmlNode> {
        let mut node = self;
        for name in path {
            node = node.child(name)?;
        }
        Some(node)
    }

    pub fn descend_text(&self, path: &[&str]) -> Option<&str> {
        self.descend(path).map(XmlNode::text)
    }
}

/// The faultstring of a SOAP fault envelope, whatever prefix the service
/// chose for it.
pub fn fault_string(root: &XmlNode) -> Option<&str> {
    root.descend_text(&["Body", "Fault", "faultstring"])
}

fn local_part(raw: &[u8]) -> String {
    let raw = String::from_utf8_lossy(raw);
    match raw.rsplit_once(':') {
        Some((_, local)) => local.to_owned(),
        None => raw.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{fault_string, XmlNode};

    #[test]
    fn lookups_ignore_namespace_prefixes() {
        let root = XmlNode::parse(
            r#"<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
                 <env:Body>
                   <wd:Get_Workers_Response xmlns:wd="urn:com.workday/bsvc">
                     <wd:Response_Data>
                       <wd:Worker>
                         <wd:Worker_Data>
                           <wd:Worker_ID>21072</wd:Worker_ID>
                         </wd:Worker_Data>
                       </wd:Worker>
                     </wd:Response_Data>
                   </wd:Get_Workers_Response>
                 </env:Body>
               </env:Envelope>"#,
        )
        .expect("well-formed document");

        assert_eq!(root.name(), "Envelope");
        let worker_id = root
            .descend_text(&["Body", "Get_Workers_Response", "Response_Data", "Worker", "Worker_Data", "Worker_ID"])
            .expect("worker id present");
        assert_eq!(worker_id, "21072");
    }

    #[test]
    fn attributes_are_local_name_keyed() {
        let root = XmlNode::parse(
            r#"<wd:ID xmlns:wd="urn:com.workday/bsvc" wd:type="Employee_ID">21072</wd:ID>"#,
        )
        .expect("well-formed document");

        assert_eq!(root.attribute("type"), Some("Employee_ID"));
        assert_eq!(root.text(), "21072");
    }

    #[test]
    fn repeated_children_are_all_reachable() {
        let root = XmlNode::parse(
            r#"<wd:ID_List xmlns:wd="urn:com.workday/bsvc">
                 <wd:ID wd:type="WID">abc123</wd:ID>
                 <wd:ID wd:type="Employee_ID">21072</wd:ID>
               </wd:ID_List>"#,
        )
        .expect("well-formed document");

        let employee_id = root
            .children_named("ID")
            .find(|id| id.attribute("type") == Some("Employee_ID"))
            .expect("typed id present");
        assert_eq!(employee_id.text(), "21072");
    }

    #[test]
    fn fault_string_handles_both_fault_prefixes() {
        let env_prefixed = XmlNode::parse(
            r#"<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
                 <env:Body>
                   <env:Fault>
                     <faultcode>env:Client</faultcode>
                     <faultstring>Validation error occurred.</faultstring>
                   </env:Fault>
                 </env:Body>
               </env:Envelope>"#,
        )
        .expect("well-formed document");
        assert_eq!(fault_string(&env_prefixed), Some("Validation error occurred."));

        let soap_env_prefixed = XmlNode::parse(
            r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
                 <SOAP-ENV:Body>
                   <SOAP-ENV:Fault>
                     <faultstring>Invalid username or password.</faultstring>
                   </SOAP-ENV:Fault>
                 </SOAP-ENV:Body>
               </SOAP-ENV:Envelope>"#,
        )
        .expect("well-formed document");
        assert_eq!(fault_string(&soap_env_prefixed), Some("Invalid username or password."));

        let no_fault = XmlNode::parse(
            r#"<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
                 <env:Body/>
               </env:Envelope>"#,
        )
        .expect("well-formed document");
        assert_eq!(fault_string(&no_fault), None);
    }

    #[test]
    fn escaped_text_is_decoded() {
        let root = XmlNode::parse("<note>Fisher &amp; Sons &lt;HQ&gt;</note>").expect("parse");
        assert_eq!(root.text(), "Fisher & Sons <HQ>");
    }
}
