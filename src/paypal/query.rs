use std::fmt;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use url::form_urlencoded;

use super::types::PaymentList;

/// Filters and pagination for `GET /v1/payments/payment`.
///
/// Unset, empty and non-positive values are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_builder::Builder)]
#[builder(pattern = "owned", setter(into, strip_option), default)]
#[builder_struct_attr(must_use)]
pub struct PaymentListParam {
    /// The number of items to list in the response.
    pub count: Option<i64>,
    /// The ID of the starting resource in the response. When results are paged, use the
    /// `next_id` value as the `start_id` to continue with the next set of results.
    pub start_id: Option<String>,
    /// The start index of the resources to return. Typically used to jump to a specific
    /// position in the resource history based on its cart.
    pub start_index: Option<i64>,
    /// The date and time when the resource was created, formatted according to RFC 3339.
    /// Indicates the start of a range of results.
    pub start_time: Option<String>,
    /// The date and time when the resource was created, formatted according to RFC 3339.
    /// Indicates the end of a range of results.
    pub end_time: Option<String>,
    /// Sorts the payments in the response by a specified value, such as `create_time`.
    pub sort_by: Option<String>,
    /// Sorts the items in the response in `asc` or `desc` order.
    pub sort_order: Option<String>,
}

impl PaymentListParam {
    pub fn builder() -> PaymentListParamBuilder {
        PaymentListParamBuilder::default()
    }

    /// Encodes the parameters as a query string, `?` included. Keys are sorted.
    pub fn query_string(&self) -> String {
        let text = [
            ("start_id", &self.start_id),
            ("start_time", &self.start_time),
            ("end_time", &self.end_time),
            ("sort_by", &self.sort_by),
            ("sort_order", &self.sort_order),
        ];
        let numbers = [("start_index", self.start_index), ("count", self.count)];

        let mut pairs = text
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|x| !x.is_empty())
                    .map(|x| (key, x.to_owned()))
            })
            .chain(numbers.into_iter().filter_map(|(key, value)| {
                value.filter(|x| *x > 0).map(|x| (key, x.to_string()))
            }))
            .collect::<Vec<_>>();
        pairs.sort_by_key(|(key, _)| *key);

        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        format!("?{query}")
    }

    /// The parameters for the page after `list`, or `None` if `list` was the last one.
    pub fn next_page(&self, list: &PaymentList) -> Option<Self> {
        list.next_id().map(|next_id| Self {
            start_id: Some(next_id.to_owned()),
            start_index: None,
            ..self.clone()
        })
    }
}

impl fmt::Display for PaymentListParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query_string())
    }
}

impl PaymentListParamBuilder {
    /// Sets `start_time` from a date-time in any zone, rendered in UTC.
    pub fn since<Tz: TimeZone>(self, at: DateTime<Tz>) -> Self {
        self.start_time(to_rfc3339(at))
    }

    /// Sets `end_time` from a date-time in any zone, rendered in UTC.
    pub fn until<Tz: TimeZone>(self, at: DateTime<Tz>) -> Self {
        self.end_time(to_rfc3339(at))
    }
}

/// Renders a date-time the way the list endpoint expects it, e.g. `2017-09-01T00:00:00Z`.
pub fn to_rfc3339<Tz: TimeZone>(at: DateTime<Tz>) -> String {
    at.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod test {
    use chrono::DateTime;
    use color_eyre::eyre::Result;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty() {
        assert_eq!("?", PaymentListParam::default().query_string());
    }

    #[test]
    fn full() -> Result<()> {
        let params = PaymentListParam::builder()
            .count(5)
            .start_id("abc")
            .sort_by("create_time")
            .sort_order("desc")
            .build()?;
        let query = params.query_string();

        assert_eq!("?count=5&sort_by=create_time&sort_order=desc&start_id=abc", query);
        assert!(!query.contains("5.000000"));
        for key in ["start_index", "start_time", "end_time"] {
            assert!(!query.contains(key));
        }
        Ok(())
    }

    #[test]
    fn non_positive_numbers_are_omitted() {
        let params = PaymentListParam {
            count: Some(0),
            start_index: Some(-1),
            ..Default::default()
        };
        assert_eq!("?", params.query_string());

        let params = PaymentListParam {
            count: Some(-3),
            start_index: Some(20),
            ..Default::default()
        };
        assert_eq!("?start_index=20", params.query_string());
    }

    #[test]
    fn empty_strings_are_omitted() {
        let params = PaymentListParam {
            start_id: Some(String::new()),
            sort_by: Some(String::new()),
            sort_order: Some("asc".to_owned()),
            ..Default::default()
        };
        assert_eq!("?sort_order=asc", params.query_string());
    }

    #[test]
    fn values_are_percent_encoded() {
        let params = PaymentListParam {
            start_time: Some("2017-01-01T00:00:00+10:00".to_owned()),
            start_id: Some("a b&c=d".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            "?start_id=a+b%26c%3Dd&start_time=2017-01-01T00%3A00%3A00%2B10%3A00",
            params.query_string()
        );
    }

    #[test]
    fn time_range() -> Result<()> {
        let params = PaymentListParam::builder()
            .since(DateTime::parse_from_rfc3339("2017-09-01T10:00:00+10:00")?)
            .until(DateTime::parse_from_rfc3339("2017-09-30T00:00:00Z")?)
            .build()?;

        assert_eq!(Some("2017-09-01T00:00:00Z"), params.start_time.as_deref());
        assert_eq!(Some("2017-09-30T00:00:00Z"), params.end_time.as_deref());
        Ok(())
    }

    #[test]
    fn next_page() {
        let params = PaymentListParam {
            count: Some(10),
            start_index: Some(3),
            sort_by: Some("create_time".to_owned()),
            ..Default::default()
        };
        let list = PaymentList {
            payments: Vec::new(),
            count: 10,
            next_id: "PAY-5TU010975T094876HLKGY3Q".to_owned(),
        };

        let next = params.next_page(&list).expect("another page");
        assert_eq!(
            "?count=10&sort_by=create_time&start_id=PAY-5TU010975T094876HLKGY3Q",
            next.to_string()
        );

        let last = PaymentList {
            next_id: String::new(),
            ..list
        };
        assert_eq!(None, params.next_page(&last));
    }
}
