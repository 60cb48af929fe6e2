use super::Error;
use serde::de::DeserializeOwned;

pub trait ResponseHandler: Sized {
    /// Decodes the body as JSON without looking at the status code; an error payload
    /// that does not match `T` surfaces as [`Error::Decode`].
    async fn json_body<T: DeserializeOwned>(self) -> Result<T, Error>;

    /// Returns the body text of a 2xx response.
    async fn success_text(self) -> Result<String, Error>;
}

impl ResponseHandler for reqwest::Response {
    async fn json_body<T: DeserializeOwned>(self) -> Result<T, Error> {
        let text = self
            .text()
            .await
            .map_err(|cause| Error::ReadBody { cause })?;

        serde_json::from_str::<T>(&text).map_err(|cause| Error::Decode { cause })
    }

    async fn success_text(self) -> Result<String, Error> {
        let status = self.status().as_u16();

        let text = self
            .text()
            .await
            .map_err(|cause| Error::ReadBody { cause })?;

        if !(200..300).contains(&status) {
            return Err(Error::UnexpectedStatus {
                status,
                message: text,
            });
        }

        Ok(text)
    }
}
